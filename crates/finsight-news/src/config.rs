//! Configuration for the news acquisition pipeline

use crate::{FeedError, Result};
use finsight_prompt::Language;
use std::time::Duration;

const DEFAULT_CLS_BASE: &str = "https://www.cls.cn";
const DEFAULT_EASTMONEY_BASE: &str = "https://np-weblist.eastmoney.com";
const DEFAULT_SINA_BASE: &str = "https://zhibo.sina.com.cn";

/// Configuration for the fetch chain, cache, and analysis prompts
///
/// Base URLs exist so tests can point every adapter at a mock server; in
/// production they stay at their defaults.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// How long a fetched batch stays valid in the single-slot cache
    pub cache_ttl: Duration,

    /// Per-adapter call timeout
    pub source_timeout: Duration,

    /// Maximum records kept from one source
    pub max_records: usize,

    /// Records with shorter titles are dropped as noise
    pub min_title_chars: usize,

    /// Base URL for the CLS telegraph adapter
    pub cls_base: String,

    /// Base URL for the Eastmoney fast-news adapter
    pub eastmoney_base: String,

    /// Base URL for the Sina live-feed adapter
    pub sina_base: String,

    /// Language the analysis prompts are rendered in
    pub language: Language,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(600),
            source_timeout: Duration::from_secs(10),
            max_records: 15,
            min_title_chars: 5,
            cls_base: DEFAULT_CLS_BASE.to_string(),
            eastmoney_base: DEFAULT_EASTMONEY_BASE.to_string(),
            sina_base: DEFAULT_SINA_BASE.to_string(),
            language: Language::Chinese,
        }
    }
}

impl FeedConfig {
    /// Load overrides from `FINSIGHT_*` environment variables
    ///
    /// Recognized: `FINSIGHT_NEWS_TTL` (seconds), `FINSIGHT_LANG`
    /// (`zh` | `en`). Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = std::env::var("FINSIGHT_NEWS_TTL")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(lang) = std::env::var("FINSIGHT_LANG")
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            config.language = Language::from_code(lang.trim());
        }

        config
    }

    /// Set the cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the per-adapter timeout
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Set the per-source record limit
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Set the prompt language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Point the CLS adapter at a different base URL
    pub fn with_cls_base(mut self, base: impl Into<String>) -> Self {
        self.cls_base = base.into();
        self
    }

    /// Point the Eastmoney adapter at a different base URL
    pub fn with_eastmoney_base(mut self, base: impl Into<String>) -> Self {
        self.eastmoney_base = base.into();
        self
    }

    /// Point the Sina adapter at a different base URL
    pub fn with_sina_base(mut self, base: impl Into<String>) -> Self {
        self.sina_base = base.into();
        self
    }

    /// Check invariants that would make every fetch cycle fail
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl.is_zero() {
            return Err(FeedError::Configuration(
                "cache_ttl must be positive".to_string(),
            ));
        }
        if self.source_timeout.is_zero() {
            return Err(FeedError::Configuration(
                "source_timeout must be positive".to_string(),
            ));
        }
        if self.max_records == 0 {
            return Err(FeedError::Configuration(
                "max_records must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
