use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by [`crate::store::CommentStore`] mutations.
///
/// Both leave the store exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    #[error("no comment at position {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl StoreError {
    /// Short machine-readable name used in session responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
