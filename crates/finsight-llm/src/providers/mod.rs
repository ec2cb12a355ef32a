//! Concrete LLM provider implementations
//!
//! One provider per endpoint flavor; both share the status-to-error mapping
//! so 401/404/other-non-200 behave identically regardless of shape.

pub mod chat;
pub mod responses;

pub use chat::ChatCompletionsProvider;
pub use responses::ResponsesProvider;

use crate::{ApiKind, LlmConfig, LlmError, LlmProvider, Result};
use reqwest::Client;

/// Build the provider matching the configured endpoint flavor
pub fn from_config(config: LlmConfig) -> Result<Box<dyn LlmProvider>> {
    config.validate()?;
    Ok(match config.api_kind {
        ApiKind::ChatCompletions => Box::new(ChatCompletionsProvider::with_config(config)?),
        ApiKind::Responses => Box::new(ResponsesProvider::with_config(config)?),
    })
}

pub(crate) fn build_client(config: &LlmConfig) -> Result<Client> {
    Ok(Client::builder().timeout(config.timeout()).build()?)
}

/// Map a non-success status to the matching error variant
pub(crate) fn status_error(status: u16, body: String, config: &LlmConfig) -> LlmError {
    match status {
        401 => LlmError::CredentialRejected,
        404 => {
            let detail = match &config.project_id {
                Some(project) => format!(
                    "model '{}' or project '{}' not found at {}",
                    config.model, project, config.api_base
                ),
                None => format!("model '{}' not found at {}", config.model, config.api_base),
            };
            LlmError::EndpointMismatch { detail }
        }
        _ => LlmError::Upstream { status, body },
    }
}

/// Convert a transport error, distinguishing timeouts
pub(crate) fn transport_error(err: reqwest::Error, timeout_secs: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(timeout_secs)
    } else {
        LlmError::Http(err)
    }
}
