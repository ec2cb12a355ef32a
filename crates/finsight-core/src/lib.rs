//! Core data model for finsight
//!
//! This crate defines the canonical record shapes shared by the news
//! acquisition pipeline and the analysis dispatcher.

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{AnalysisKind, AnalysisRequest, AnalysisResult, NewsBatch, NewsRecord};
