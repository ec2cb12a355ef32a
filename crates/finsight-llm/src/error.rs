//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while calling a completion endpoint
///
/// Every upstream failure mode lands in exactly one variant so the caller
/// can turn it into a user-facing message without string matching.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key was configured
    #[error("API key not configured")]
    CredentialMissing,

    /// The endpoint rejected the API key (HTTP 401)
    #[error("Authentication failed: the API key was rejected, check that it is a valid sk- key")]
    CredentialRejected,

    /// The endpoint or model path does not exist (HTTP 404)
    #[error("Endpoint mismatch: {detail}")]
    EndpointMismatch { detail: String },

    /// Any other non-success status
    #[error("Upstream error HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// A 200 response whose body did not contain extractable text
    #[error("Unexpected response shape, raw body: {body}")]
    MalformedResponse { body: String },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration was invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Convert LlmError to finsight_core::Error
impl From<LlmError> for finsight_core::Error {
    fn from(err: LlmError) -> Self {
        finsight_core::Error::ProcessingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_rejected_names_the_key() {
        let message = LlmError::CredentialRejected.to_string();
        assert!(message.contains("API key"));
        assert!(message.contains("sk-"));
    }

    #[test]
    fn test_upstream_carries_status_and_body() {
        let err = LlmError::Upstream {
            status: 503,
            body: "service unavailable".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("service unavailable"));
    }

    #[test]
    fn test_malformed_response_carries_raw_body() {
        let err = LlmError::MalformedResponse {
            body: r#"{"unexpected":true}"#.to_string(),
        };
        assert!(err.to_string().contains(r#"{"unexpected":true}"#));
    }

    #[test]
    fn test_core_error_conversion() {
        let core_err: finsight_core::Error = LlmError::CredentialMissing.into();
        match core_err {
            finsight_core::Error::ProcessingFailed(msg) => {
                assert!(msg.contains("not configured"));
            }
            _ => panic!("Expected ProcessingFailed variant"),
        }
    }
}
