//! Line-delimited JSON requests and responses for `pulse session`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::Bucket;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Submit { author: String, text: String },
    Delete { index: usize },
    DeleteMany { indices: Vec<usize> },
    List,
    Words { top_n: Option<usize> },
    Distribution,
    Timeline { bucket: Option<Bucket> },
    UploadProposal { path: PathBuf },
    Proposal,
    Report,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl Response {
    pub fn success<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self {
            ok: true,
            result: Some(serde_json::to_value(value)?),
            error: None,
        })
    }

    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ErrorBody {
                kind: kind.into(),
                message: message.into(),
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }
}
