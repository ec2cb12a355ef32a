//! Configuration for the LLM provider layer

use crate::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
const DEFAULT_MODEL: &str = "qwen-plus";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Which endpoint flavor the provider should speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    /// `POST {base}/chat/completions`, answer in `choices[0].message.content`
    #[default]
    ChatCompletions,
    /// `POST {base}/responses`, answer in `output[..].content[..].text`
    Responses,
}

impl ApiKind {
    /// Parse from a configuration string, defaulting to chat completions
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "responses" | "response" => ApiKind::Responses,
            _ => ApiKind::ChatCompletions,
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKind::ChatCompletions => write!(f, "chat_completions"),
            ApiKind::Responses => write!(f, "responses"),
        }
    }
}

/// Configuration for LLM providers
///
/// A missing API key is a supported state: the caller runs in a degraded
/// "not configured" mode and surfaces that to the user instead of calling
/// out. `from_env` therefore never fails.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key; `None` disables calls entirely
    pub api_key: Option<String>,

    /// Base URL of the provider endpoint
    ///
    /// Defaults to the DashScope OpenAI-compatible gateway; any
    /// OpenAI-compatible deployment works.
    pub api_base: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Optional project identifier, sent as the `OpenAI-Project` header
    pub project_id: Option<String>,

    /// Endpoint flavor to speak
    pub api_kind: ApiKind,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            project_id: None,
            api_kind: ApiKind::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl LlmConfig {
    /// Config with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Load from `FINSIGHT_*` environment variables
    ///
    /// Recognized: `FINSIGHT_API_KEY`, `FINSIGHT_API_BASE`, `FINSIGHT_MODEL`,
    /// `FINSIGHT_PROJECT`, `FINSIGHT_API_KIND`. Unset variables keep their
    /// defaults; an unset key yields the degraded mode.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(key) = env_nonempty("FINSIGHT_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(base) = env_nonempty("FINSIGHT_API_BASE") {
            config.api_base = base;
        }
        if let Some(model) = env_nonempty("FINSIGHT_MODEL") {
            config.model = model;
        }
        if let Some(project) = env_nonempty("FINSIGHT_PROJECT") {
            config.project_id = Some(project);
        }
        if let Some(kind) = env_nonempty("FINSIGHT_API_KIND") {
            config.api_kind = ApiKind::from_code(&kind);
        }

        config
    }

    /// Set the base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the project identifier
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the endpoint flavor
    pub fn with_api_kind(mut self, api_kind: ApiKind) -> Self {
        self.api_kind = api_kind;
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Whether an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check invariants that would make every call fail
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(LlmError::Configuration("api_base must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(LlmError::Configuration("model must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(LlmError::Configuration(
                "timeout_secs must be positive".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::Configuration(format!(
                "temperature {} outside supported range 0.0..=2.0",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Environment variable value, treating blank as unset
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, "qwen-plus");
        assert_eq!(config.api_kind, ApiKind::ChatCompletions);
        assert_eq!(config.timeout_secs, 30);
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = LlmConfig::new("sk-test")
            .with_api_base("http://localhost:8000/v1")
            .with_model("qwen-turbo")
            .with_project("proj-1")
            .with_api_kind(ApiKind::Responses)
            .with_timeout(5)
            .with_temperature(0.7);

        assert!(config.is_configured());
        assert_eq!(config.api_base, "http://localhost:8000/v1");
        assert_eq!(config.model, "qwen-turbo");
        assert_eq!(config.project_id.as_deref(), Some("proj-1"));
        assert_eq!(config.api_kind, ApiKind::Responses);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_counts_as_unconfigured() {
        let config = LlmConfig {
            api_key: Some("   ".to_string()),
            ..LlmConfig::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LlmConfig::default().with_timeout(0);
        assert!(config.validate().is_err());

        let config = LlmConfig::default().with_temperature(3.5);
        assert!(config.validate().is_err());

        let config = LlmConfig::default().with_model("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_kind_from_code() {
        assert_eq!(ApiKind::from_code("responses"), ApiKind::Responses);
        assert_eq!(ApiKind::from_code("RESPONSES"), ApiKind::Responses);
        assert_eq!(ApiKind::from_code("chat"), ApiKind::ChatCompletions);
        assert_eq!(ApiKind::from_code(""), ApiKind::ChatCompletions);
    }

    #[test]
    fn test_from_env_round_trip() {
        unsafe {
            std::env::set_var("FINSIGHT_API_KEY", "sk-from-env");
            std::env::set_var("FINSIGHT_API_BASE", "http://localhost:9000/v1");
            std::env::set_var("FINSIGHT_MODEL", "qwen-max");
            std::env::set_var("FINSIGHT_PROJECT", "proj-env");
            std::env::set_var("FINSIGHT_API_KIND", "responses");
        }

        let config = LlmConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert_eq!(config.model, "qwen-max");
        assert_eq!(config.project_id.as_deref(), Some("proj-env"));
        assert_eq!(config.api_kind, ApiKind::Responses);

        unsafe {
            std::env::remove_var("FINSIGHT_API_KEY");
            std::env::remove_var("FINSIGHT_API_BASE");
            std::env::remove_var("FINSIGHT_MODEL");
            std::env::remove_var("FINSIGHT_PROJECT");
            std::env::remove_var("FINSIGHT_API_KIND");
        }
    }
}
