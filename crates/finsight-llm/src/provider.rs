//! LLM provider trait definition

use crate::{ChatRequest, Result};
use async_trait::async_trait;

/// Trait for completion endpoints
///
/// Implementations own the HTTP specifics of one endpoint flavor and return
/// the extracted answer text. All failure modes come back as [`crate::LlmError`]
/// values; implementations never panic on upstream behavior.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt pair and extract plain text from the response
    async fn complete(&self, request: ChatRequest) -> Result<String>;

    /// Provider name (e.g. "chat_completions", "responses")
    fn name(&self) -> &str;
}
