//! Text → [`SentimentTag`] classification.
//!
//! Every classifier is a pure function of its input text: no shared mutable
//! state, safe to call from any thread.

mod keyword;
mod lexicon;

pub use keyword::{DEFAULT_NEGATIVE, DEFAULT_POSITIVE, KeywordClassifier, MatchMode};
pub use lexicon::{LexiconClassifier, LexiconScorer, PolarityScorer, PolarityThresholds};

use crate::config::{Algorithm, ClassifierConfig};
use crate::models::SentimentTag;

pub trait Classifier: Send + Sync {
    /// Total: empty or meaningless text is `Neutral`.
    fn classify(&self, text: &str) -> SentimentTag;

    fn name(&self) -> &'static str;

    /// The continuous score behind the tag, for scoring classifiers.
    fn score(&self, _text: &str) -> Option<f64> {
        None
    }
}

/// Compare two evidence counts. Ties, including 0/0, are `Neutral`.
pub fn tag_from_counts(positive: usize, negative: usize) -> SentimentTag {
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => SentimentTag::Positive,
        std::cmp::Ordering::Less => SentimentTag::Negative,
        std::cmp::Ordering::Equal => SentimentTag::Neutral,
    }
}

pub fn build_classifier(config: &ClassifierConfig) -> Box<dyn Classifier> {
    match config.algorithm {
        Algorithm::Keyword => Box::new(KeywordClassifier::new(
            config.positive.as_slice(),
            config.negative.as_slice(),
            config.match_mode,
        )),
        Algorithm::Lexicon => Box::new(LexiconClassifier::new(
            LexiconScorer::default(),
            config.thresholds,
        )),
    }
}
