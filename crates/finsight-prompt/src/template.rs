//! Core prompt template trait

use crate::{Language, PromptError, Result};

/// A named, multi-language prompt template
///
/// Implementations render with `serde_json::Value` variables so the trait
/// stays dyn-compatible and a registry can hold heterogeneous templates.
pub trait PromptTemplate: Send + Sync {
    /// Template name/identifier
    fn name(&self) -> &str;

    /// Languages this template has variants for
    fn languages(&self) -> Vec<Language>;

    /// Check whether a language variant exists
    fn supports_language(&self, lang: &Language) -> bool {
        self.languages().contains(lang)
    }

    /// Render the variant for a specific language
    ///
    /// Fails when the language has no variant or rendering itself fails.
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;

    /// Render, falling back when the requested language is unavailable
    ///
    /// Order: requested language, then English, then the first variant found.
    fn render_with_fallback(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }

        if self.supports_language(&Language::English) {
            return self.render(&Language::English, vars);
        }

        let fallback = self
            .languages()
            .into_iter()
            .next()
            .ok_or_else(|| PromptError::NoLanguageAvailable(self.name().to_string()))?;

        self.render(&fallback, vars)
    }

    /// Raw template source for a language, for inspection
    fn raw_template(&self, lang: &Language) -> Option<&str>;
}
