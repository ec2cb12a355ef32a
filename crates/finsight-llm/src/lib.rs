//! LLM provider layer for finsight
//!
//! This crate turns a rendered analysis prompt into plain answer text. Two
//! provider implementations cover the two upstream envelope shapes we have
//! to tolerate:
//!
//! - [`providers::ChatCompletionsProvider`] - the `choices[0].message.content`
//!   chat-completion shape
//! - [`providers::ResponsesProvider`] - the `output[..].content[..].text`
//!   responses shape
//!
//! Both map transport and status failures into [`LlmError`] variants; nothing
//! in this crate panics on upstream behavior.

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;
pub mod request;

pub use config::{ApiKind, LlmConfig};
pub use error::{LlmError, Result};
pub use provider::LlmProvider;
pub use providers::{ChatCompletionsProvider, ResponsesProvider, from_config};
pub use request::ChatRequest;
