//! News acquisition and analysis pipeline for finsight
//!
//! The pipeline in one line: an ordered chain of source adapters feeds a
//! single-slot TTL cache, and an [`Analyst`] engine turns any cached record
//! plus an analysis kind into prompt text for the configured LLM provider.
//!
//! Resilience is the design center:
//! - [`fetch::FallbackFetcher`] tries sources in priority order and serves
//!   a deterministic seed batch when all of them fail - it never errors and
//!   never returns an empty batch.
//! - [`cache::BatchCache`] bounds the upstream call rate; concurrent misses
//!   coalesce into one fetch.
//! - [`engine::Analyst`] converts every LLM failure into a display string;
//!   nothing at that boundary is fallible.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod prompts;
pub mod seed;
pub mod source;

pub use cache::BatchCache;
pub use config::FeedConfig;
pub use engine::Analyst;
pub use error::{FeedError, Result};
pub use fetch::FallbackFetcher;
pub use seed::{SEED_LEN, SEED_SOURCE, seed_batch};
pub use source::{ClsTelegraph, EastmoneyFastNews, NewsSource, SinaLive};
