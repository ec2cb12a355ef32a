//! MiniJinja-based template implementation

use crate::{Language, PromptError, PromptTemplate, Result};
use minijinja::Environment;
use std::collections::HashMap;

/// A prompt template backed by MiniJinja
///
/// Holds one template source per language and renders with standard Jinja2
/// syntax: `{{ variable }}`, filters, conditionals, loops.
///
/// # Examples
///
/// ```
/// use finsight_prompt::{JinjaTemplate, Language, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::bilingual(
///     "headline",
///     "Title: {{ title }}",
///     "标题：{{ title }}",
/// ).unwrap();
///
/// let en = template.render(&Language::English, &json!({ "title": "CPI data" })).unwrap();
/// assert_eq!(en, "Title: CPI data");
/// ```
pub struct JinjaTemplate {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplate {
    /// Start a builder for a template with the given name
    pub fn builder(name: impl Into<String>) -> JinjaTemplateBuilder {
        JinjaTemplateBuilder::new(name)
    }

    /// Create from a single source (stored as the English variant)
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        Self::builder(name).english(template).build()
    }

    /// Create with English and Chinese variants
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        chinese: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name).english(english).chinese(chinese).build()
    }
}

/// Environment with the filters our templates rely on
///
/// Built fresh per call; `Environment` borrows added template sources, so a
/// long-lived shared instance would fight the registry's ownership model.
fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("truncate_chars", |s: Option<String>, limit: usize| {
        let s = s.unwrap_or_default();
        if s.chars().count() <= limit {
            s
        } else {
            let mut truncated: String = s.chars().take(limit).collect();
            truncated.push('…');
            truncated
        }
    });
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> Vec<Language> {
        self.templates.keys().cloned().collect()
    }

    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        let template_str =
            self.templates
                .get(lang)
                .ok_or_else(|| PromptError::TemplateNotFound {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                })?;

        let env = environment();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(template_str, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }

    fn raw_template(&self, lang: &Language) -> Option<&str> {
        self.templates.get(lang).map(|s| s.as_str())
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("languages", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`JinjaTemplate`]
pub struct JinjaTemplateBuilder {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplateBuilder {
    /// Create a new builder with the given template name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: HashMap::new(),
        }
    }

    /// Add a variant for a specific language
    pub fn template(mut self, lang: Language, content: impl Into<String>) -> Self {
        self.templates.insert(lang, content.into());
        self
    }

    /// Add the English variant
    pub fn english(self, content: impl Into<String>) -> Self {
        self.template(Language::English, content)
    }

    /// Add the Chinese variant
    pub fn chinese(self, content: impl Into<String>) -> Self {
        self.template(Language::Chinese, content)
    }

    /// Build the template, parse-checking every variant
    pub fn build(self) -> Result<JinjaTemplate> {
        if self.templates.is_empty() {
            return Err(PromptError::NoTemplatesProvided(self.name));
        }

        let env = environment();
        for (lang, content) in &self.templates {
            env.template_from_str(content)
                .map_err(|e| PromptError::TemplateParseFailed {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                    detail: e.to_string(),
                })?;
        }

        Ok(JinjaTemplate {
            name: self.name,
            templates: self.templates,
        })
    }
}
