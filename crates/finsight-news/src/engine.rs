//! Analyst engine - the facade the UI layer talks to
//!
//! Everything at this boundary is infallible: the worst outcome of any
//! operation is a degraded batch or a human-readable failure string in
//! place of an analysis. Selection *state* stays in the caller; the engine
//! only resolves indices against the current batch.

use crate::cache::BatchCache;
use crate::fetch::FallbackFetcher;
use crate::prompts;
use crate::{FeedConfig, FeedError, Result};
use finsight_core::{AnalysisKind, AnalysisResult, NewsBatch, NewsRecord};
use finsight_llm::{ChatRequest, LlmConfig, LlmError, LlmProvider};
use finsight_prompt::{Language, PromptRegistry};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// One engine per process/session
pub struct Analyst {
    config: FeedConfig,
    cache: BatchCache,
    fetcher: FallbackFetcher,
    provider: Option<Box<dyn LlmProvider>>,
    registry: PromptRegistry,
    history: Mutex<Vec<AnalysisResult>>,
}

impl Analyst {
    /// Build the standard engine: three-source chain plus the configured
    /// provider flavor
    ///
    /// A missing API key is not an error; the engine runs in a degraded
    /// mode where analysis requests return a "not configured" message.
    pub fn new(feed_config: FeedConfig, llm_config: LlmConfig) -> Result<Self> {
        let fetcher = FallbackFetcher::from_config(&feed_config)?;

        let provider = if llm_config.is_configured() {
            match finsight_llm::from_config(llm_config) {
                Ok(provider) => {
                    info!(provider = provider.name(), "LLM provider ready");
                    Some(provider)
                }
                Err(err) => {
                    warn!(error = %err, "LLM provider misconfigured, analysis disabled");
                    None
                }
            }
        } else {
            info!("no API key configured, analysis runs in degraded mode");
            None
        };

        Self::with_parts(feed_config, fetcher, provider)
    }

    /// Build from explicit parts (used by tests and embedders)
    pub fn with_parts(
        config: FeedConfig,
        fetcher: FallbackFetcher,
        provider: Option<Box<dyn LlmProvider>>,
    ) -> Result<Self> {
        config.validate()?;
        let registry = PromptRegistry::with_language(config.language.clone());
        prompts::register_prompts(&registry)
            .map_err(|e| FeedError::Configuration(e.to_string()))?;

        Ok(Self {
            cache: BatchCache::new(config.cache_ttl),
            config,
            fetcher,
            provider,
            registry,
            history: Mutex::new(Vec::new()),
        })
    }

    /// Current batch, cache-checked
    pub async fn news(&self) -> NewsBatch {
        self.cache
            .get_or_fetch(Instant::now(), || self.fetcher.fetch_news())
            .await
    }

    /// Positional read of the current batch
    pub async fn select(&self, index: usize) -> Option<NewsRecord> {
        self.news().await.get(index).cloned()
    }

    /// Bypass the TTL and fetch a new batch
    pub async fn refresh(&self) -> NewsBatch {
        self.cache.clear().await;
        self.news().await
    }

    /// Analyze the record at `index` from the given angle
    ///
    /// Always returns a result; failures (bad index, missing key, provider
    /// errors) become the result's text. Every result is appended to the
    /// session history.
    pub async fn request_analysis(&self, index: usize, kind: AnalysisKind) -> AnalysisResult {
        let batch = self.news().await;
        let result = match batch.get(index) {
            Some(record) => {
                let text = self.analyze_record(record, kind).await;
                AnalysisResult::new(text, kind, &record.title)
            }
            None => AnalysisResult::new(self.out_of_range_text(index, batch.len()), kind, ""),
        };

        let mut history = self.history.lock().await;
        history.push(result.clone());
        result
    }

    /// Results produced so far in this session, oldest first
    pub async fn history(&self) -> Vec<AnalysisResult> {
        self.history.lock().await.clone()
    }

    async fn analyze_record(&self, record: &NewsRecord, kind: AnalysisKind) -> String {
        let Some(provider) = &self.provider else {
            return self.not_configured_text();
        };

        let (system, user) = match prompts::build(&self.registry, record, kind) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, "prompt rendering failed");
                return self.failure_text(&format!("{err}"));
            }
        };

        match provider
            .complete(ChatRequest::new(user).with_system(system))
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, kind = %kind, "analysis call failed");
                self.llm_failure_text(&err)
            }
        }
    }

    fn chinese(&self) -> bool {
        self.config.language == Language::Chinese
    }

    fn not_configured_text(&self) -> String {
        if self.chinese() {
            "尚未配置 API Key：请设置 FINSIGHT_API_KEY 后重试。".to_string()
        } else {
            "API key not configured: set FINSIGHT_API_KEY to enable analysis.".to_string()
        }
    }

    fn out_of_range_text(&self, index: usize, len: usize) -> String {
        if self.chinese() {
            format!("无效的新闻序号 {index}：当前列表共 {len} 条。")
        } else {
            format!("invalid news index {index}: the current batch has {len} records")
        }
    }

    fn failure_text(&self, detail: &str) -> String {
        if self.chinese() {
            format!("分析失败: {detail}")
        } else {
            format!("Analysis failed: {detail}")
        }
    }

    fn llm_failure_text(&self, err: &LlmError) -> String {
        let mut text = self.failure_text(&err.to_string());
        if matches!(err, LlmError::CredentialRejected) && self.chinese() {
            text.push_str("\n请检查 API Key 是否为 sk- 开头的有效密钥。");
        }
        text
    }
}
