use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Classifier, tag_from_counts};
use crate::models::SentimentTag;

pub const DEFAULT_POSITIVE: &[&str] = &[
    "good",
    "great",
    "excellent",
    "happy",
    "love",
    "positive",
    "wonderful",
];

pub const DEFAULT_NEGATIVE: &[&str] = &[
    "bad", "sad", "poor", "terrible", "hate", "negative", "angry",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Whitespace-separated tokens must equal a keyword exactly.
    #[default]
    Token,
    /// Every occurrence of a keyword inside the text counts, overlapping
    /// and mid-word included.
    Substring,
}

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    positive: HashSet<String>,
    negative: HashSet<String>,
    mode: MatchMode,
}

impl KeywordClassifier {
    pub fn new<S: AsRef<str>>(positive: &[S], negative: &[S], mode: MatchMode) -> Self {
        Self {
            positive: lowercase_set(positive),
            negative: lowercase_set(negative),
            mode,
        }
    }

    /// `(positive, negative)` match counts for `text`.
    pub fn counts(&self, text: &str) -> (usize, usize) {
        let text = text.to_lowercase();
        match self.mode {
            MatchMode::Token => {
                let mut pos = 0;
                let mut neg = 0;
                for word in text.split_whitespace() {
                    if self.positive.contains(word) {
                        pos += 1;
                    }
                    if self.negative.contains(word) {
                        neg += 1;
                    }
                }
                (pos, neg)
            }
            MatchMode::Substring => (
                self.positive
                    .iter()
                    .map(|k| count_occurrences(&text, k))
                    .sum(),
                self.negative
                    .iter()
                    .map(|k| count_occurrences(&text, k))
                    .sum(),
            ),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_POSITIVE, DEFAULT_NEGATIVE, MatchMode::Token)
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str) -> SentimentTag {
        let (pos, neg) = self.counts(text);
        tag_from_counts(pos, neg)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

fn lowercase_set<S: AsRef<str>>(words: &[S]) -> HashSet<String> {
    words
        .iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .char_indices()
        .filter(|(i, _)| haystack[*i..].starts_with(needle))
        .count()
}
