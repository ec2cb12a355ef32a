//! Responses-API provider
//!
//! Speaks the newer `POST {base}/responses` protocol. The answer lives in a
//! different envelope than chat completions: a list of output items, each
//! holding a list of content items, any of which may carry the text. The
//! first extractable text field wins.

use crate::providers::{build_client, status_error, transport_error};
use crate::{ChatRequest, LlmConfig, LlmError, LlmProvider, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Provider for the responses endpoint flavor
pub struct ResponsesProvider {
    client: Client,
    config: LlmConfig,
}

impl ResponsesProvider {
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
impl LlmProvider for ResponsesProvider {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::CredentialMissing)?;

        let mut input = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            input.push(WireInputItem {
                role: "system",
                content: system.clone(),
            });
        }
        input.push(WireInputItem {
            role: "user",
            content: request.user.clone(),
        });

        let wire_request = WireRequest {
            model: &self.config.model,
            input,
            temperature: request.temperature.unwrap_or(self.config.temperature),
        };

        debug!(api_base = %self.config.api_base, "sending responses request");

        let mut builder = self
            .client
            .post(format!("{}/responses", self.config.api_base))
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
        "responses"
    }
}

/// Pull the first text content item out of a 200 body
///
/// Output items without content (reasoning items, tool calls) and content
/// items without text are skipped, not errors.
fn extract_text(body: &str) -> Result<String> {
    let parsed: WireResponse = serde_json::from_str(body).map_err(|_| {
        LlmError::MalformedResponse {
            body: body.to_string(),
        }
    })?;

    parsed
        .output
        .unwrap_or_default()
        .into_iter()
        .flat_map(|item| item.content.unwrap_or_default())
        .find_map(|content| content.text.filter(|t| !t.is_empty()))
        .ok_or_else(|| LlmError::MalformedResponse {
            body: body.to_string(),
        })
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    input: Vec<WireInputItem>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireInputItem {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    output: Option<Vec<WireOutputItem>>,
}

#[derive(Debug, Deserialize)]
struct WireOutputItem {
    content: Option<Vec<WireContentItem>>,
}

#[derive(Debug, Deserialize)]
struct WireContentItem {
    text: Option<String>,
}
