use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SentimentTag {
    Positive,
    Negative,
    Neutral,
}

/// Per-tag comment counts. Every tag is always present, zero when unseen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(rename = "Positive")]
    positive: usize,
    #[serde(rename = "Negative")]
    negative: usize,
    #[serde(rename = "Neutral")]
    neutral: usize,
}

impl SentimentCounts {
    pub fn new(positive: usize, negative: usize, neutral: usize) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    pub fn get(&self, tag: SentimentTag) -> usize {
        match tag {
            SentimentTag::Positive => self.positive,
            SentimentTag::Negative => self.negative,
            SentimentTag::Neutral => self.neutral,
        }
    }

    pub fn increment(&mut self, tag: SentimentTag) {
        match tag {
            SentimentTag::Positive => self.positive += 1,
            SentimentTag::Negative => self.negative += 1,
            SentimentTag::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Tags with their counts, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SentimentTag, usize)> + '_ {
        SentimentTag::iter().map(|tag| (tag, self.get(tag)))
    }
}

impl FromIterator<SentimentTag> for SentimentCounts {
    fn from_iter<I: IntoIterator<Item = SentimentTag>>(iter: I) -> Self {
        let mut counts = Self::default();
        for tag in iter {
            counts.increment(tag);
        }
        counts
    }
}
