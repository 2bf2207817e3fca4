use std::path::Path;

use anyhow::{Context, Result};
use jiff::civil::DateTime;
use serde::Serialize;

use crate::aggregate::{Bucket, TimelineEntry, WordCount};
use crate::config::PulseConfig;
use crate::error::StoreError;
use crate::helpers::{atomic_write, now_local};
use crate::models::{Comment, Proposal, SentimentCounts};
use crate::protocol::{Request, Response};
use crate::sentiment::{Classifier, build_classifier};
use crate::store::CommentStore;

const SESSION_ID_LEN: usize = 8;

/// A comment together with its current position.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedComment<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub comment: &'a Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateRequest {
    Words { top_n: Option<usize> },
    Distribution,
    Timeline { bucket: Option<Bucket> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Aggregate {
    Words(Vec<WordCount>),
    Distribution(SentimentCounts),
    Timeline(Vec<TimelineEntry<String>>),
}

/// Everything the admin view shows, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub comments: Vec<IndexedComment<'a>>,
    pub top_words: Vec<WordCount>,
    pub distribution: SentimentCounts,
    pub timeline: Vec<TimelineEntry<String>>,
}

impl Report<'_> {
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        atomic_write(path, content.as_bytes())
    }
}

#[derive(Debug, Serialize)]
struct ProposalInfo<'a> {
    filename: &'a str,
    size: usize,
    text: Option<&'a str>,
}

/// One user's isolated state: a comment store, the classifier that tags
/// new comments, and the current proposal. Dropped with the process.
pub struct Session {
    id: String,
    store: CommentStore,
    classifier: Box<dyn Classifier>,
    config: PulseConfig,
    proposal: Option<Proposal>,
}

impl Session {
    pub fn new(config: PulseConfig) -> Self {
        let classifier = build_classifier(&config.classifier);
        Self {
            id: nanoid::nanoid!(SESSION_ID_LEN),
            store: CommentStore::new(),
            classifier,
            config,
            proposal: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn comments(&self) -> &[Comment] {
        self.store.list_all()
    }

    pub fn indexed_comments(&self) -> Vec<IndexedComment<'_>> {
        self.store
            .list_all()
            .iter()
            .enumerate()
            .map(|(index, comment)| IndexedComment { index, comment })
            .collect()
    }

    pub fn submit_comment(&mut self, author: &str, text: &str) -> Result<Comment, StoreError> {
        self.submit_comment_at(author, text, now_local())
    }

    pub fn submit_comment_at(
        &mut self,
        author: &str,
        text: &str,
        timestamp: DateTime,
    ) -> Result<Comment, StoreError> {
        let classifier = &self.classifier;
        self.store
            .append(author, text, |t| classifier.classify(t), || timestamp)
    }

    pub fn request_delete(&mut self, index: usize) -> Result<Comment, StoreError> {
        self.store.delete_at(index)
    }

    pub fn request_delete_many(&mut self, indices: &[usize]) -> Result<Vec<Comment>, StoreError> {
        self.store.delete_many(indices)
    }

    /// Compute one aggregate. Unset parameters fall back to configuration.
    pub fn request_aggregates(&self, request: AggregateRequest) -> Aggregate {
        match request {
            AggregateRequest::Words { top_n } => {
                let mut options = self.config.words.options();
                if let Some(top_n) = top_n {
                    options = options.with_top_n(top_n);
                }
                Aggregate::Words(self.store.word_frequency(&options))
            }
            AggregateRequest::Distribution => {
                Aggregate::Distribution(self.store.sentiment_distribution())
            }
            AggregateRequest::Timeline { bucket } => {
                let bucket = bucket.unwrap_or(self.config.timeline.bucket);
                Aggregate::Timeline(self.store.sentiment_timeline(|ts| bucket.key(ts)))
            }
        }
    }

    pub fn report(&self) -> Report<'_> {
        let bucket = self.config.timeline.bucket;
        Report {
            comments: self.indexed_comments(),
            top_words: self.store.word_frequency(&self.config.words.options()),
            distribution: self.store.sentiment_distribution(),
            timeline: self.store.sentiment_timeline(|ts| bucket.key(ts)),
        }
    }

    pub fn upload_proposal(&mut self, proposal: Proposal) {
        tracing::info!(
            session = %self.id,
            filename = proposal.filename(),
            size = proposal.len(),
            "proposal uploaded"
        );
        self.proposal = Some(proposal);
    }

    pub fn upload_proposal_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read proposal {}", path.display()))?;
        let filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.upload_proposal(Proposal::new(filename, content));
        Ok(())
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        self.proposal.as_ref()
    }

    /// Apply one protocol request. Store and I/O failures become error
    /// responses; only a serialization failure is returned as `Err`.
    pub fn handle(&mut self, request: Request) -> serde_json::Result<Response> {
        match request {
            Request::Submit { author, text } => match self.submit_comment(&author, &text) {
                Ok(comment) => {
                    let index = self.store.len() - 1;
                    Response::success(&IndexedComment {
                        index,
                        comment: &comment,
                    })
                }
                Err(err) => Ok(self.rejected(&err)),
            },
            Request::Delete { index } => match self.request_delete(index) {
                Ok(comment) => Response::success(&comment),
                Err(err) => Ok(self.rejected(&err)),
            },
            Request::DeleteMany { indices } => match self.request_delete_many(&indices) {
                Ok(comments) => Response::success(&comments),
                Err(err) => Ok(self.rejected(&err)),
            },
            Request::List => Response::success(&self.indexed_comments()),
            Request::Words { top_n } => {
                Response::success(&self.request_aggregates(AggregateRequest::Words { top_n }))
            }
            Request::Distribution => {
                Response::success(&self.request_aggregates(AggregateRequest::Distribution))
            }
            Request::Timeline { bucket } => {
                Response::success(&self.request_aggregates(AggregateRequest::Timeline { bucket }))
            }
            Request::UploadProposal { path } => match self.upload_proposal_file(&path) {
                Ok(()) => Response::success(&self.proposal_info()),
                Err(err) => {
                    tracing::warn!(session = %self.id, error = %err, "proposal upload failed");
                    Ok(Response::failure("io", format!("{err:#}")))
                }
            },
            Request::Proposal => Response::success(&self.proposal_info()),
            Request::Report => Response::success(&self.report()),
        }
    }

    fn proposal_info(&self) -> Option<ProposalInfo<'_>> {
        self.proposal.as_ref().map(|p| ProposalInfo {
            filename: p.filename(),
            size: p.len(),
            text: p.as_text(),
        })
    }

    fn rejected(&self, err: &StoreError) -> Response {
        tracing::warn!(session = %self.id, error = %err, "request rejected");
        Response::failure(err.kind(), err.to_string())
    }
}
