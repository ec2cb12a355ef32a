//! Prompt template registry

use crate::{Language, PromptError, PromptTemplate, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe store of named templates with a default language
///
/// One registry is built at startup, populated with the analysis templates,
/// and shared read-only afterwards.
pub struct PromptRegistry {
    templates: RwLock<HashMap<String, Arc<dyn PromptTemplate>>>,
    default_language: RwLock<Language>,
}

impl PromptRegistry {
    /// Empty registry defaulting to English
    pub fn new() -> Self {
        Self::with_language(Language::English)
    }

    /// Empty registry with a specific default language
    pub fn with_language(lang: Language) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            default_language: RwLock::new(lang),
        }
    }

    /// Change the default language
    pub fn set_default_language(&self, lang: Language) {
        if let Ok(mut default) = self.default_language.write() {
            *default = lang;
        }
    }

    /// Current default language
    pub fn default_language(&self) -> Language {
        self.default_language
            .read()
            .map(|l| l.clone())
            .unwrap_or(Language::English)
    }

    /// Register a template, replacing any existing one with the same name
    pub fn register<T: PromptTemplate + 'static>(&self, template: T) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    /// Look up a template by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn PromptTemplate>> {
        self.templates.read().ok()?.get(name).cloned()
    }

    /// Whether a template with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(name))
            .unwrap_or(false)
    }

    /// Render a template using the default language (with fallback)
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;

        let lang = self.default_language();
        template.render_with_fallback(&lang, vars)
    }

    /// Render a template for a specific language (with fallback)
    pub fn render_with_lang(
        &self,
        name: &str,
        lang: &Language,
        vars: &serde_json::Value,
    ) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;

        template.render_with_fallback(lang, vars)
    }

    /// Names of all registered templates
    pub fn list(&self) -> Vec<String> {
        self.templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Whether the registry holds no templates
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("default_language", &self.default_language())
            .field("template_count", &self.len())
            .finish()
    }
}
