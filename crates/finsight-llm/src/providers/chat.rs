//! Chat-completions provider
//!
//! Speaks the OpenAI-compatible `POST {base}/chat/completions` protocol and
//! extracts the answer from the `choices[0].message.content` envelope. The
//! DashScope compatible-mode gateway and any OpenAI-compatible deployment
//! work through this provider.

use crate::providers::{build_client, status_error, transport_error};
use crate::{ChatRequest, LlmConfig, LlmError, LlmProvider, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Provider for the chat-completions endpoint flavor
pub struct ChatCompletionsProvider {
    client: Client,
    config: LlmConfig,
}

impl ChatCompletionsProvider {
    /// Create a provider with custom configuration
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Create a provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(LlmConfig::new(api_key))
    }

    /// Current configuration
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsProvider {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::CredentialMissing)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system",
                content: system.clone(),
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: request.user.clone(),
        });

        let wire_request = WireRequest {
            model: &self.config.model,
            messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
        };

        debug!(api_base = %self.config.api_base, "sending chat-completions request");

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&wire_request);
        if let Some(project) = &self.config.project_id {
            builder = builder.header("OpenAI-Project", project);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body, &self.config));
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_secs))?;
        extract_text(&body)
    }

    fn name(&self) -> &str {
        "chat_completions"
    }
}

/// Pull the answer text out of a 200 body
///
/// A 200 whose body does not match the expected shape is reported as
/// [`LlmError::MalformedResponse`] carrying the raw body for diagnosis.
fn extract_text(body: &str) -> Result<String> {
    let parsed: WireResponse = serde_json::from_str(body).map_err(|_| {
        LlmError::MalformedResponse {
            body: body.to_string(),
        }
    })?;

    parsed
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| LlmError::MalformedResponse {
            body: body.to_string(),
        })
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

// Option-heavy on purpose: upstream gateways disagree on which sibling
// fields are present, and a missing one must not fail deserialization.
#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Option<Vec<WireChoice>>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: Option<WireChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}
