//! Error types for finsight-core

use thiserror::Error;

/// Result type alias for finsight-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared across the workspace
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Configuration was missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A pipeline stage failed while processing data
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}
