//! Prompt template management for finsight
//!
//! Analysis prompts are bilingual (English/Chinese) Jinja2 templates rendered
//! with the fields of a news record. Templates are registered once in a
//! [`PromptRegistry`] and looked up by name at request time.
//!
//! # Quick Start
//!
//! ```
//! use finsight_prompt::{JinjaTemplate, Language, PromptRegistry, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::bilingual(
//!     "headline",
//!     "News title: {{ title }}",
//!     "新闻标题：{{ title }}",
//! ).unwrap();
//!
//! let zh = template
//!     .render(&Language::Chinese, &json!({ "title": "央行降准" }))
//!     .unwrap();
//! assert_eq!(zh, "新闻标题：央行降准");
//! ```

mod error;
mod jinja;
mod language;
mod registry;
mod template;

pub use error::{PromptError, Result};
pub use jinja::{JinjaTemplate, JinjaTemplateBuilder};
pub use language::Language;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;
