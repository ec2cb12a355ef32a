//! Error types for the news acquisition pipeline
//!
//! Any of these counts as "this source is unavailable" to the fallback
//! chain; none of them ever reaches the engine's callers.

use thiserror::Error;

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors a single source adapter can produce
#[derive(Error, Debug)]
pub enum FeedError {
    /// The outer response wrapper did not match the provider's contract
    #[error("{source_name}: unexpected response envelope: {detail}")]
    Envelope { source_name: String, detail: String },

    /// Non-success HTTP status from the provider
    #[error("{source_name}: HTTP {status}")]
    Status { source_name: String, status: u16 },

    /// Every row was filtered out or the provider sent none
    #[error("{source_name}: no usable records")]
    Empty { source_name: String },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration was invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FeedError {
    /// Envelope-mismatch error for a named source
    pub fn envelope(source_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Envelope {
            source_name: source_name.into(),
            detail: detail.into(),
        }
    }

    /// Empty-result error for a named source
    pub fn empty(source_name: impl Into<String>) -> Self {
        Self::Empty {
            source_name: source_name.into(),
        }
    }
}

/// Convert FeedError to finsight_core::Error
impl From<FeedError> for finsight_core::Error {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Configuration(msg) => finsight_core::Error::Configuration(msg),
            other => finsight_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}
