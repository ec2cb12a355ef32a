//! Language support for prompt templates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages a template can carry variants for
///
/// The analysis prompts ship English and Chinese variants; other languages
/// can be attached through [`Language::Other`] with an ISO 639-1 code.
///
/// # Examples
///
/// ```
/// use finsight_prompt::Language;
///
/// assert_eq!(Language::Chinese.code(), "zh");
/// assert_eq!(Language::from_code("english"), Language::English);
/// assert_eq!(Language::from_code("ja"), Language::Other("ja".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Chinese (Simplified)
    Chinese,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// ISO 639-1 language code
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Other(code) => code,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Chinese => "Chinese",
            Language::Other(code) => code,
        }
    }

    /// Parse from an ISO 639-1 code or a common name
    pub fn from_code(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" | "english" => Language::English,
            "zh" | "chinese" | "中文" | "zh-cn" | "zh-hans" => Language::Chinese,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::from_code(&s)
    }
}
