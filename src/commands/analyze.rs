use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::PulseConfig;
use crate::helpers::{now_local, parse_datetime};
use crate::session::Session;

/// One comment as found in an import file. Accepts the `name`/`comment`
/// keys used by exported form data as well as `author`/`text`.
#[derive(Debug, Deserialize)]
pub struct CommentRecord {
    #[serde(alias = "name")]
    pub author: String,
    #[serde(alias = "comment")]
    pub text: String,
    #[serde(default, alias = "timestamp")]
    pub date: Option<String>,
}

/// A record that was not imported, with its position in the file.
#[derive(Debug)]
pub struct Skipped {
    pub position: usize,
    pub reason: String,
}

pub struct AnalyzeResult {
    pub session: Session,
    pub skipped: Vec<Skipped>,
}

pub fn run(file: &Path, config: PulseConfig) -> Result<AnalyzeResult> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<CommentRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    Ok(import(records, config))
}

/// Feed records through a fresh session. Bad records are skipped, never fatal.
pub fn import(records: Vec<CommentRecord>, config: PulseConfig) -> AnalyzeResult {
    let mut session = Session::new(config);
    let mut skipped = Vec::new();

    for (position, record) in records.into_iter().enumerate() {
        let timestamp = match record.date.as_deref().map(parse_datetime) {
            Some(Ok(ts)) => ts,
            Some(Err(err)) => {
                skipped.push(Skipped {
                    position,
                    reason: format!("{err:#}"),
                });
                continue;
            }
            None => now_local(),
        };

        if let Err(err) = session.submit_comment_at(&record.author, &record.text, timestamp) {
            tracing::warn!(position, error = %err, "skipping record");
            skipped.push(Skipped {
                position,
                reason: err.to_string(),
            });
        }
    }

    AnalyzeResult { session, skipped }
}
