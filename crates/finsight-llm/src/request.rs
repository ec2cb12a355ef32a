//! Request type shared by all providers

use serde::{Deserialize, Serialize};

/// One prompt pair sent to a completion endpoint
///
/// Model, temperature, and credentials come from the provider's config; the
/// request carries only what changes per call. `temperature` here overrides
/// the configured default when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Instruction prompt establishing the persona
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The user prompt built from the news record
    pub user: String,

    /// Per-request temperature override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a request with only a user prompt
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            temperature: None,
        }
    }

    /// Attach a system prompt
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the configured temperature for this call
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
