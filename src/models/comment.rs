use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::SentimentTag;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    author: String,
    text: String,
    sentiment: SentimentTag,
    timestamp: DateTime,
}

impl Comment {
    /// Only the store builds comments, after validating author and text.
    pub(crate) fn new(
        author: String,
        text: String,
        sentiment: SentimentTag,
        timestamp: DateTime,
    ) -> Self {
        Self {
            author,
            text,
            sentiment,
            timestamp,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentiment(&self) -> SentimentTag {
        self.sentiment
    }

    pub fn timestamp(&self) -> DateTime {
        self.timestamp
    }
}
