use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::models::SentimentTag;

/// Scores text on a continuous scale in `[-1, 1]`.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Cut-offs mapping a polarity score to a tag.
///
/// Scores at or beyond a threshold (strictly beyond when `inclusive` is
/// false) take that side's tag; everything between is `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityThresholds {
    pub positive: f64,
    pub negative: f64,
    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

impl PolarityThresholds {
    /// Cut-offs for compound scores: `>= 0.05` / `<= -0.05`.
    pub const fn compound() -> Self {
        Self {
            positive: 0.05,
            negative: -0.05,
            inclusive: true,
        }
    }

    /// Cut-offs for plain polarity scores: `> 0.1` / `< -0.1`.
    pub const fn polarity() -> Self {
        Self {
            positive: 0.1,
            negative: -0.1,
            inclusive: false,
        }
    }

    pub fn tag(&self, score: f64) -> SentimentTag {
        let (is_positive, is_negative) = if self.inclusive {
            (score >= self.positive, score <= self.negative)
        } else {
            (score > self.positive, score < self.negative)
        };

        if is_positive {
            SentimentTag::Positive
        } else if is_negative {
            SentimentTag::Negative
        } else {
            SentimentTag::Neutral
        }
    }
}

impl Default for PolarityThresholds {
    fn default() -> Self {
        Self::compound()
    }
}

const WORD_VALENCES: &[(&str, f64)] = &[
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("happy", 2.7),
    ("love", 3.2),
    ("positive", 2.6),
    ("wonderful", 2.7),
    ("amazing", 2.8),
    ("best", 3.2),
    ("nice", 1.8),
    ("support", 1.7),
    ("agree", 1.5),
    ("helpful", 1.8),
    ("clear", 1.2),
    ("bad", -2.5),
    ("sad", -2.1),
    ("poor", -2.1),
    ("terrible", -2.1),
    ("hate", -2.7),
    ("negative", -2.7),
    ("angry", -2.3),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("disagree", -1.6),
    ("confusing", -1.3),
    ("unclear", -1.0),
    ("problem", -1.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "isn't", "wasn't", "aren't", "won't", "can't", "cannot", "don't",
    "doesn't", "without",
];

/// How far back a negator still applies.
const NEGATION_WINDOW: usize = 3;
/// A negated word keeps most of its weight with the sign flipped.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalisation constant bounding the summed valence into `(-1, 1)`.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Word-valence scorer with negation handling.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: WORD_VALENCES
                .iter()
                .map(|(w, v)| ((*w).to_string(), *v))
                .collect(),
        }
    }

    /// Add or replace a word's valence.
    pub fn insert(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }

    fn raw_sum(&self, text: &str) -> f64 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut sum = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(valence) = self.valences.get(token) else {
                continue;
            };
            let negated = (1..=NEGATION_WINDOW)
                .any(|k| i >= k && NEGATORS.contains(&tokens[i - k].as_str()));
            sum += if negated {
                valence * NEGATION_SCALAR
            } else {
                *valence
            };
        }

        sum
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let sum = self.raw_sum(text);
        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

pub struct LexiconClassifier {
    scorer: Box<dyn PolarityScorer>,
    thresholds: PolarityThresholds,
}

impl LexiconClassifier {
    pub fn new<S: PolarityScorer + 'static>(scorer: S, thresholds: PolarityThresholds) -> Self {
        Self {
            scorer: Box::new(scorer),
            thresholds,
        }
    }

    pub fn thresholds(&self) -> PolarityThresholds {
        self.thresholds
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str) -> SentimentTag {
        self.thresholds.tag(self.scorer.score(text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Option<f64> {
        Some(self.scorer.score(text))
    }
}
