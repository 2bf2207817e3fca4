//! Derived views over comment collections: word counts and time buckets.

use std::collections::{HashMap, HashSet};

use clap::ValueEnum;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::SentimentCounts;

/// A token and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Sentiment counts for one timeline bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry<K> {
    pub bucket: K,
    #[serde(flatten)]
    pub counts: SentimentCounts,
}

#[derive(Debug, Clone, Default)]
pub struct WordFrequencyOptions {
    top_n: usize,
    stopwords: HashSet<String>,
    alphabetic_only: bool,
}

impl WordFrequencyOptions {
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            ..Self::default()
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Stopwords are compared against lowercased tokens.
    pub fn with_stopwords<S: AsRef<str>>(mut self, stopwords: &[S]) -> Self {
        self.stopwords = stopwords
            .iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Drop tokens containing anything other than letters.
    pub fn alphabetic_only(mut self, enabled: bool) -> Self {
        self.alphabetic_only = enabled;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    fn keeps(&self, token: &str) -> bool {
        if self.stopwords.contains(token) {
            return false;
        }
        !self.alphabetic_only || token.chars().all(char::is_alphabetic)
    }
}

/// Count lowercased whitespace tokens across `texts`, most frequent first.
///
/// Equal counts keep the order in which each word first appeared.
pub fn word_frequency<'a, I>(texts: I, options: &WordFrequencyOptions) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    if options.top_n == 0 {
        return Vec::new();
    }

    let mut counts: Vec<WordCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for text in texts {
        for token in text.to_lowercase().split_whitespace() {
            if !options.keeps(token) {
                continue;
            }
            match positions.get(token).copied() {
                Some(pos) => counts[pos].count += 1,
                None => {
                    positions.insert(token.to_string(), counts.len());
                    counts.push(WordCount {
                        word: token.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // Stable sort: ties stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(options.top_n);
    counts
}

/// Standard timeline granularities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    Day,
    Month,
}

impl Bucket {
    /// Sortable key: `YYYY-MM-DD` or `YYYY-MM`.
    pub fn key(self, timestamp: &DateTime) -> String {
        match self {
            Self::Day => timestamp.strftime("%Y-%m-%d").to_string(),
            Self::Month => timestamp.strftime("%Y-%m").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use rstest::rstest;

    fn counts(pairs: &[(&str, usize)]) -> Vec<WordCount> {
        pairs
            .iter()
            .map(|(w, c)| WordCount {
                word: (*w).to_string(),
                count: *c,
            })
            .collect()
    }

    // "cat" is seen before "dog", so it wins the tie.
    #[rstest]
    fn ties_keep_first_seen_order() {
        let result = word_frequency(["cat dog cat", "dog bird"], &WordFrequencyOptions::new(2));
        assert_eq!(result, counts(&[("cat", 2), ("dog", 2)]));
    }

    #[rstest]
    fn later_words_can_overtake() {
        let result = word_frequency(
            ["alpha beta", "beta gamma beta"],
            &WordFrequencyOptions::new(5),
        );
        assert_eq!(
            result,
            counts(&[("beta", 3), ("alpha", 1), ("gamma", 1)])
        );
    }

    #[rstest]
    fn tokens_are_lowercased() {
        let result = word_frequency(["Good GOOD good"], &WordFrequencyOptions::new(5));
        assert_eq!(result, counts(&[("good", 3)]));
    }

    #[rstest]
    fn stopwords_are_skipped_case_insensitively() {
        let options = WordFrequencyOptions::new(5).with_stopwords(&["The", "is"]);
        let result = word_frequency(["the plan is the plan"], &options);
        assert_eq!(result, counts(&[("plan", 2)]));
    }

    #[rstest]
    fn alphabetic_filter_drops_punctuated_tokens() {
        let options = WordFrequencyOptions::new(5).alphabetic_only(true);
        let result = word_frequency(["great! great 2025 café"], &options);
        assert_eq!(result, counts(&[("great", 1), ("café", 1)]));
    }

    #[rstest]
    #[case::zero(0, 0)]
    #[case::fewer_than_distinct(2, 2)]
    #[case::more_than_distinct(10, 4)]
    fn top_n_limits_result(#[case] top_n: usize, #[case] expected_len: usize) {
        let result = word_frequency(["a b c d a"], &WordFrequencyOptions::new(top_n));
        assert_eq!(result.len(), expected_len);
    }

    #[rstest]
    fn empty_input_yields_nothing() {
        let texts: [&str; 0] = [];
        assert!(word_frequency(texts, &WordFrequencyOptions::new(5)).is_empty());
    }

    #[rstest]
    #[case(Bucket::Day, "2025-01-09")]
    #[case(Bucket::Month, "2025-01")]
    fn bucket_keys(#[case] bucket: Bucket, #[case] expected: &str) {
        let ts = date(2025, 1, 9).at(23, 59, 59, 0);
        assert_eq!(bucket.key(&ts), expected);
    }
}
