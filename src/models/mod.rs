mod comment;
mod proposal;
mod sentiment;

pub use comment::Comment;
pub use proposal::Proposal;
pub use sentiment::{SentimentCounts, SentimentTag};
