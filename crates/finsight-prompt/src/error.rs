//! Error types for prompt operations

use thiserror::Error;

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors that can occur while building, registering, or rendering templates
#[derive(Error, Debug)]
pub enum PromptError {
    /// Template has no variant for the requested language
    #[error("Template '{name}' not found for language '{language}'")]
    TemplateNotFound { name: String, language: String },

    /// Template source failed to parse
    #[error("Failed to parse template '{name}' for language '{language}': {detail}")]
    TemplateParseFailed {
        name: String,
        language: String,
        detail: String,
    },

    /// Rendering failed (missing variable, filter error, ...)
    #[error("Failed to render template '{name}': {detail}")]
    RenderError { name: String, detail: String },

    /// Builder finished without any language variant
    #[error("No templates provided for '{0}'")]
    NoTemplatesProvided(String),

    /// Fallback rendering found no variant at all
    #[error("No language available for template '{0}'")]
    NoLanguageAvailable(String),

    /// Lookup by name missed the registry
    #[error("Template '{0}' not registered")]
    TemplateNotRegistered(String),
}
