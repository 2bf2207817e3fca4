use std::collections::BTreeMap;
use std::sync::Arc;

use jiff::civil::DateTime;
use parking_lot::RwLock;

use crate::aggregate::{self, TimelineEntry, WordCount, WordFrequencyOptions};
use crate::error::StoreError;
use crate::models::{Comment, SentimentCounts, SentimentTag};

/// Comments in insertion order.
///
/// Positions are not identities: after any delete, later comments shift
/// down by one, so callers re-read [`CommentStore::list_all`] instead of
/// holding on to indices.
#[derive(Debug, Clone, Default)]
pub struct CommentStore {
    comments: Vec<Comment>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, tag, timestamp and append a new comment.
    ///
    /// `classify` runs once; the resulting tag is frozen on the comment.
    pub fn append<C, T>(
        &mut self,
        author: &str,
        text: &str,
        classify: C,
        timestamp: T,
    ) -> Result<Comment, StoreError>
    where
        C: FnOnce(&str) -> SentimentTag,
        T: FnOnce() -> DateTime,
    {
        if author.trim().is_empty() {
            return Err(StoreError::Validation { field: "author" });
        }
        if text.trim().is_empty() {
            return Err(StoreError::Validation { field: "text" });
        }

        let sentiment = classify(text);
        let comment = Comment::new(author.to_string(), text.to_string(), sentiment, timestamp());
        self.comments.push(comment.clone());

        tracing::debug!(
            position = self.comments.len() - 1,
            sentiment = sentiment.as_ref(),
            "appended comment"
        );
        Ok(comment)
    }

    pub fn delete_at(&mut self, index: usize) -> Result<Comment, StoreError> {
        let len = self.comments.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let removed = self.comments.remove(index);
        tracing::debug!(position = index, remaining = len - 1, "deleted comment");
        Ok(removed)
    }

    /// Remove several positions at once, all measured against the current
    /// order. Either every index is valid and all are removed, or nothing
    /// changes. Duplicates are ignored. Removed comments come back in
    /// ascending position order.
    pub fn delete_many(&mut self, indices: &[usize]) -> Result<Vec<Comment>, StoreError> {
        let len = self.comments.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let mut targets = indices.to_vec();
        targets.sort_unstable();
        targets.dedup();

        let mut removed: Vec<Comment> = targets
            .iter()
            .rev()
            .map(|&i| self.comments.remove(i))
            .collect();
        removed.reverse();

        tracing::debug!(
            count = removed.len(),
            remaining = self.comments.len(),
            "deleted comments"
        );
        Ok(removed)
    }

    pub fn list_all(&self) -> &[Comment] {
        &self.comments
    }

    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn word_frequency(&self, options: &WordFrequencyOptions) -> Vec<WordCount> {
        aggregate::word_frequency(self.comments.iter().map(Comment::text), options)
    }

    pub fn sentiment_distribution(&self) -> SentimentCounts {
        self.comments.iter().map(Comment::sentiment).collect()
    }

    /// Per-bucket sentiment counts, buckets in ascending key order.
    pub fn sentiment_timeline<K, F>(&self, bucket_fn: F) -> Vec<TimelineEntry<K>>
    where
        K: Ord,
        F: Fn(&DateTime) -> K,
    {
        let mut buckets: BTreeMap<K, SentimentCounts> = BTreeMap::new();
        for comment in &self.comments {
            buckets
                .entry(bucket_fn(&comment.timestamp()))
                .or_default()
                .increment(comment.sentiment());
        }

        buckets
            .into_iter()
            .map(|(bucket, counts)| TimelineEntry { bucket, counts })
            .collect()
    }
}

/// A [`CommentStore`] shared between sessions.
///
/// Mutations hold the write lock for their whole duration so appends and
/// deletes never interleave; aggregates run under the read lock.
#[derive(Debug, Clone, Default)]
pub struct SharedCommentStore {
    inner: Arc<RwLock<CommentStore>>,
}

impl SharedCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<C, T>(
        &self,
        author: &str,
        text: &str,
        classify: C,
        timestamp: T,
    ) -> Result<Comment, StoreError>
    where
        C: FnOnce(&str) -> SentimentTag,
        T: FnOnce() -> DateTime,
    {
        self.inner.write().append(author, text, classify, timestamp)
    }

    pub fn delete_at(&self, index: usize) -> Result<Comment, StoreError> {
        self.inner.write().delete_at(index)
    }

    pub fn delete_many(&self, indices: &[usize]) -> Result<Vec<Comment>, StoreError> {
        self.inner.write().delete_many(indices)
    }

    /// A copy of the comments as of now.
    pub fn snapshot(&self) -> Vec<Comment> {
        self.inner.read().list_all().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn word_frequency(&self, options: &WordFrequencyOptions) -> Vec<WordCount> {
        self.inner.read().word_frequency(options)
    }

    pub fn sentiment_distribution(&self) -> SentimentCounts {
        self.inner.read().sentiment_distribution()
    }

    pub fn sentiment_timeline<K, F>(&self, bucket_fn: F) -> Vec<TimelineEntry<K>>
    where
        K: Ord,
        F: Fn(&DateTime) -> K,
    {
        self.inner.read().sentiment_timeline(bucket_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Bucket;
    use crate::sentiment::{Classifier, KeywordClassifier};
    use jiff::civil::date;
    use rstest::{fixture, rstest};

    fn at(y: i16, m: i8, d: i8) -> DateTime {
        date(y, m, d).at(12, 0, 0, 0)
    }

    fn add(store: &mut CommentStore, author: &str, text: &str, ts: DateTime) -> Comment {
        let classifier = KeywordClassifier::default();
        store
            .append(author, text, |t| classifier.classify(t), || ts)
            .unwrap()
    }

    fn texts(store: &CommentStore) -> Vec<&str> {
        store.list_all().iter().map(Comment::text).collect()
    }

    /// A store holding three comments: "one", "two", "three".
    #[fixture]
    fn store() -> CommentStore {
        let mut store = CommentStore::new();
        for text in ["one", "two", "three"] {
            add(&mut store, "ann", text, at(2025, 1, 1));
        }
        store
    }

    // -- append --

    // A valid append grows the store by one and the new comment sits at the
    // end with the classifier's tag and the supplied timestamp.
    #[rstest]
    fn append_adds_to_end(store: CommentStore) {
        let mut store = store;
        let ts = at(2025, 3, 4);
        let comment = add(&mut store, "bob", "I love this, it is great", ts);

        assert_eq!(store.len(), 4);
        assert_eq!(store.list_all().last(), Some(&comment));
        assert_eq!(comment.author(), "bob");
        assert_eq!(comment.sentiment(), SentimentTag::Positive);
        assert_eq!(comment.timestamp(), ts);
    }

    #[rstest]
    #[case::empty_author("", "hello", "author")]
    #[case::blank_author("  \t", "hello", "author")]
    #[case::empty_text("ann", "", "text")]
    #[case::blank_text("ann", "\n  ", "text")]
    #[case::both_blank(" ", " ", "author")]
    fn append_rejects_blank_fields(
        store: CommentStore,
        #[case] author: &str,
        #[case] text: &str,
        #[case] field: &'static str,
    ) {
        let mut store = store;
        let err = store
            .append(author, text, |_| SentimentTag::Neutral, || at(2025, 1, 1))
            .unwrap_err();

        assert_eq!(err, StoreError::Validation { field });
        assert_eq!(store.len(), 3);
    }

    // Rejected input never reaches the classifier or the clock.
    #[rstest]
    fn append_validates_before_classifying() {
        let mut store = CommentStore::new();
        let result = store.append(
            "",
            "text",
            |_| panic!("classifier must not run"),
            || panic!("clock must not run"),
        );
        assert!(result.is_err());
    }

    // The tag is computed once at creation; a different classifier later on
    // does not touch stored comments.
    #[rstest]
    fn sentiment_is_frozen_at_creation() {
        let mut store = CommentStore::new();
        store
            .append("ann", "meh", |_| SentimentTag::Positive, || at(2025, 1, 1))
            .unwrap();
        store
            .append("bob", "meh", |_| SentimentTag::Negative, || at(2025, 1, 1))
            .unwrap();

        assert_eq!(store.list_all()[0].sentiment(), SentimentTag::Positive);
        assert_eq!(store.list_all()[1].sentiment(), SentimentTag::Negative);
    }

    // Text and author are stored as given, untrimmed.
    #[rstest]
    fn append_keeps_raw_text() {
        let mut store = CommentStore::new();
        let comment = add(&mut store, " ann ", "  spaced  ", at(2025, 1, 1));
        assert_eq!(comment.author(), " ann ");
        assert_eq!(comment.text(), "  spaced  ");
    }

    // -- delete_at --

    #[rstest]
    #[case::first(0, "one", vec!["two", "three"])]
    #[case::middle(1, "two", vec!["one", "three"])]
    #[case::last(2, "three", vec!["one", "two"])]
    fn delete_at_removes_and_shifts(
        store: CommentStore,
        #[case] index: usize,
        #[case] removed: &str,
        #[case] remaining: Vec<&str>,
    ) {
        let mut store = store;
        let comment = store.delete_at(index).unwrap();
        assert_eq!(comment.text(), removed);
        assert_eq!(texts(&store), remaining);
    }

    #[rstest]
    fn delete_at_out_of_range_leaves_store(store: CommentStore) {
        let mut store = store;
        let err = store.delete_at(3).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(texts(&store), vec!["one", "two", "three"]);
    }

    #[rstest]
    fn delete_at_on_empty_store_fails() {
        let mut store = CommentStore::new();
        assert_eq!(
            store.delete_at(0).unwrap_err(),
            StoreError::IndexOutOfRange { index: 0, len: 0 }
        );
    }

    // -- delete_many --

    // Indices refer to positions before any removal, regardless of the
    // order they are given in.
    #[rstest]
    fn delete_many_uses_original_positions(store: CommentStore) {
        let mut store = store;
        let removed = store.delete_many(&[2, 0]).unwrap();
        assert_eq!(
            removed.iter().map(Comment::text).collect::<Vec<_>>(),
            vec!["one", "three"]
        );
        assert_eq!(texts(&store), vec!["two"]);
    }

    #[rstest]
    fn delete_many_ignores_duplicates(store: CommentStore) {
        let mut store = store;
        let removed = store.delete_many(&[1, 1, 1]).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(texts(&store), vec!["one", "three"]);
    }

    // One bad index aborts the whole batch.
    #[rstest]
    fn delete_many_is_all_or_nothing(store: CommentStore) {
        let mut store = store;
        let err = store.delete_many(&[0, 7, 1]).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 7, len: 3 });
        assert_eq!(store.len(), 3);
    }

    #[rstest]
    fn delete_many_empty_is_noop(store: CommentStore) {
        let mut store = store;
        assert!(store.delete_many(&[]).unwrap().is_empty());
        assert_eq!(store.len(), 3);
    }

    // -- aggregates --

    #[rstest]
    fn word_frequency_over_all_comments() {
        let mut store = CommentStore::new();
        add(&mut store, "ann", "cat dog cat", at(2025, 1, 1));
        add(&mut store, "bob", "dog bird", at(2025, 1, 1));

        let words = store.word_frequency(&WordFrequencyOptions::new(2));
        let pairs: Vec<(&str, usize)> = words.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(pairs, vec![("cat", 2), ("dog", 2)]);
    }

    #[rstest]
    fn distribution_always_has_every_tag() {
        let store = CommentStore::new();
        let counts = store.sentiment_distribution();
        assert_eq!(counts, SentimentCounts::new(0, 0, 0));
    }

    #[rstest]
    fn distribution_sums_to_len() {
        let mut store = CommentStore::new();
        add(&mut store, "a", "good", at(2025, 1, 1));
        add(&mut store, "b", "bad", at(2025, 1, 1));
        add(&mut store, "c", "good great", at(2025, 1, 1));
        add(&mut store, "d", "ok", at(2025, 1, 1));

        let counts = store.sentiment_distribution();
        assert_eq!(counts, SentimentCounts::new(2, 1, 1));
        assert_eq!(counts.total(), store.len());
    }

    #[rstest]
    fn timeline_groups_by_day_in_order() {
        let mut store = CommentStore::new();
        add(&mut store, "a", "great", at(2025, 1, 2));
        add(&mut store, "b", "good", at(2025, 1, 1));
        add(&mut store, "c", "sad", date(2025, 1, 1).at(23, 59, 0, 0));

        let timeline = store.sentiment_timeline(|ts| Bucket::Day.key(ts));
        assert_eq!(
            timeline,
            vec![
                TimelineEntry {
                    bucket: "2025-01-01".to_string(),
                    counts: SentimentCounts::new(1, 1, 0),
                },
                TimelineEntry {
                    bucket: "2025-01-02".to_string(),
                    counts: SentimentCounts::new(1, 0, 0),
                },
            ]
        );
    }

    // Any ordered key works, not just strings.
    #[rstest]
    fn timeline_accepts_custom_keys() {
        let mut store = CommentStore::new();
        add(&mut store, "a", "good", at(2024, 12, 31));
        add(&mut store, "b", "bad", at(2025, 6, 1));
        add(&mut store, "c", "meh", at(2025, 1, 1));

        let timeline = store.sentiment_timeline(|ts| ts.year());
        let years: Vec<i16> = timeline.iter().map(|e| e.bucket).collect();
        assert_eq!(years, vec![2024, 2025]);
        assert_eq!(timeline[1].counts, SentimentCounts::new(0, 1, 1));
    }

    #[rstest]
    fn aggregates_on_empty_store_are_empty() {
        let store = CommentStore::new();
        assert!(store.word_frequency(&WordFrequencyOptions::new(5)).is_empty());
        assert!(store.sentiment_timeline(|ts| Bucket::Day.key(ts)).is_empty());
    }

    // Reading twice without a mutation in between gives the same answer.
    #[rstest]
    fn aggregates_are_repeatable(store: CommentStore) {
        let options = WordFrequencyOptions::new(5);
        assert_eq!(store.word_frequency(&options), store.word_frequency(&options));
        assert_eq!(store.sentiment_distribution(), store.sentiment_distribution());
        assert_eq!(
            store.sentiment_timeline(|ts| Bucket::Month.key(ts)),
            store.sentiment_timeline(|ts| Bucket::Month.key(ts))
        );
    }

    // -- SharedCommentStore --

    // Concurrent appends from several threads all land; none are lost.
    #[rstest]
    fn shared_store_serializes_appends() {
        let shared = SharedCommentStore::new();

        std::thread::scope(|scope| {
            for thread in 0..4 {
                let shared = shared.clone();
                scope.spawn(move || {
                    for i in 0..25 {
                        shared
                            .append(
                                &format!("user{thread}"),
                                &format!("comment {i}"),
                                |_| SentimentTag::Neutral,
                                || at(2025, 1, 1),
                            )
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(shared.len(), 100);
        assert_eq!(shared.sentiment_distribution().get(SentimentTag::Neutral), 100);
    }

    #[rstest]
    fn shared_store_snapshot_is_a_copy() {
        let shared = SharedCommentStore::new();
        shared
            .append("ann", "good", |_| SentimentTag::Positive, || at(2025, 1, 1))
            .unwrap();

        let snapshot = shared.snapshot();
        shared.delete_at(0).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(shared.is_empty());
        assert!(shared.delete_at(0).is_err());
    }
}
