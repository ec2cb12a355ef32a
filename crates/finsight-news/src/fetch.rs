//! Fallback chain over the source adapters
//!
//! Sources are tried in priority order; the first non-empty, schema-valid
//! batch wins and later sources are never touched. Failures are `Result`
//! values matched explicitly and logged, never propagated: when the whole
//! chain is exhausted the caller gets the seed batch instead of an error.

use crate::seed::seed_batch;
use crate::source::{ClsTelegraph, EastmoneyFastNews, NewsSource, SinaLive};
use crate::{FeedConfig, Result};
use chrono::Local;
use finsight_core::{NewsBatch, NewsRecord};
use std::time::Duration;
use tracing::{info, warn};

/// Ordered fallback chain with a seed-batch backstop
pub struct FallbackFetcher {
    sources: Vec<Box<dyn NewsSource>>,
    source_timeout: Duration,
}

impl FallbackFetcher {
    /// Chain over an explicit source list (highest priority first)
    pub fn new(sources: Vec<Box<dyn NewsSource>>, source_timeout: Duration) -> Self {
        Self {
            sources,
            source_timeout,
        }
    }

    /// Standard three-source chain: CLS, then Eastmoney, then Sina
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        config.validate()?;
        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(ClsTelegraph::from_config(config)?),
            Box::new(EastmoneyFastNews::from_config(config)?),
            Box::new(SinaLive::from_config(config)?),
        ];
        Ok(Self::new(sources, config.source_timeout))
    }

    /// Fetch one batch; infallible and never empty
    ///
    /// The per-source `tokio::time::timeout` bounds a source whose own HTTP
    /// timeout misbehaves; timeouts count as that source failing.
    pub async fn fetch_news(&self) -> NewsBatch {
        for source in &self.sources {
            let name = source.name();
            match tokio::time::timeout(self.source_timeout, source.fetch()).await {
                Ok(Ok(records)) => {
                    if let Some(records) = validate_batch(records) {
                        info!(source = name, count = records.len(), "news batch fetched");
                        return NewsBatch::live(name, records);
                    }
                    warn!(source = name, "batch failed schema validation, trying next source");
                }
                Ok(Err(err)) => {
                    warn!(source = name, error = %err, "source failed, trying next source");
                }
                Err(_) => {
                    warn!(
                        source = name,
                        timeout_secs = self.source_timeout.as_secs(),
                        "source timed out, trying next source"
                    );
                }
            }
        }

        warn!("all news sources exhausted, serving degraded seed batch");
        seed_batch(Local::now())
    }
}

/// Accept a batch only when it is non-empty and every record has a title
///
/// A source that hands back rows with missing titles is rejected outright
/// rather than partially accepted with null fields.
fn validate_batch(records: Vec<NewsRecord>) -> Option<Vec<NewsRecord>> {
    if records.is_empty() {
        return None;
    }
    if records.iter().any(|r| r.title.trim().is_empty()) {
        return None;
    }
    Some(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeedError;
    use crate::seed::{SEED_LEN, SEED_SOURCE};
    use crate::source::MockNewsSource;

    fn records() -> Vec<NewsRecord> {
        vec![
            NewsRecord::new("央行宣布降准", "2025-11-03", "09:41"),
            NewsRecord::new("三大指数高开", "2025-11-03", "09:31"),
        ]
    }

    fn ok_source(name: &'static str) -> MockNewsSource {
        let mut source = MockNewsSource::new();
        source.expect_name().return_const(name.to_string());
        source.expect_fetch().times(1).returning(|| Ok(records()));
        source
    }

    fn failing_source(name: &'static str) -> MockNewsSource {
        let mut source = MockNewsSource::new();
        source.expect_name().return_const(name.to_string());
        source
            .expect_fetch()
            .times(1)
            .returning(move || Err(FeedError::empty(name)));
        source
    }

    fn untouched_source(name: &'static str) -> MockNewsSource {
        let mut source = MockNewsSource::new();
        source.expect_name().return_const(name.to_string());
        source.expect_fetch().times(0);
        source
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let fetcher = FallbackFetcher::new(
            vec![
                Box::new(ok_source("cls")),
                Box::new(untouched_source("eastmoney")),
                Box::new(untouched_source("sina")),
            ],
            Duration::from_secs(10),
        );

        let batch = fetcher.fetch_news().await;
        assert_eq!(batch.source, "cls");
        assert!(!batch.is_degraded);
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_falls_through_to_next_source() {
        let fetcher = FallbackFetcher::new(
            vec![
                Box::new(failing_source("cls")),
                Box::new(ok_source("eastmoney")),
                Box::new(untouched_source("sina")),
            ],
            Duration::from_secs(10),
        );

        let batch = fetcher.fetch_news().await;
        assert_eq!(batch.source, "eastmoney");
        assert!(!batch.is_degraded);
    }

    #[tokio::test]
    async fn test_empty_batch_counts_as_failure() {
        let mut empty = MockNewsSource::new();
        empty.expect_name().return_const("cls".to_string());
        empty.expect_fetch().times(1).returning(|| Ok(vec![]));

        let fetcher = FallbackFetcher::new(
            vec![Box::new(empty), Box::new(ok_source("eastmoney"))],
            Duration::from_secs(10),
        );

        let batch = fetcher.fetch_news().await;
        assert_eq!(batch.source, "eastmoney");
    }

    #[tokio::test]
    async fn test_missing_title_rejects_the_whole_batch() {
        let mut tainted = MockNewsSource::new();
        tainted.expect_name().return_const("cls".to_string());
        tainted.expect_fetch().times(1).returning(|| {
            Ok(vec![
                NewsRecord::new("正常标题在此", "2025-11-03", "09:41"),
                NewsRecord::new("  ", "2025-11-03", "09:40"),
            ])
        });

        let fetcher = FallbackFetcher::new(
            vec![Box::new(tainted), Box::new(ok_source("eastmoney"))],
            Duration::from_secs(10),
        );

        let batch = fetcher.fetch_news().await;
        assert_eq!(batch.source, "eastmoney");
    }

    #[tokio::test]
    async fn test_all_sources_exhausted_serves_seed() {
        let fetcher = FallbackFetcher::new(
            vec![
                Box::new(failing_source("cls")),
                Box::new(failing_source("eastmoney")),
                Box::new(failing_source("sina")),
            ],
            Duration::from_secs(10),
        );

        let batch = fetcher.fetch_news().await;
        assert!(batch.is_degraded);
        assert_eq!(batch.source, SEED_SOURCE);
        assert_eq!(batch.len(), SEED_LEN);
    }

    #[tokio::test]
    async fn test_empty_chain_serves_seed() {
        let fetcher = FallbackFetcher::new(vec![], Duration::from_secs(10));
        let batch = fetcher.fetch_news().await;
        assert!(batch.is_degraded);
        assert!(!batch.is_empty());
    }

    struct SlowSource;

    #[async_trait::async_trait]
    impl NewsSource for SlowSource {
        async fn fetch(&self) -> crate::Result<Vec<NewsRecord>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(records())
        }

        fn name(&self) -> &str {
            "cls"
        }
    }

    #[tokio::test]
    async fn test_slow_source_times_out_and_falls_through() {
        let fetcher = FallbackFetcher::new(
            vec![Box::new(SlowSource), Box::new(ok_source("eastmoney"))],
            Duration::from_millis(50),
        );

        let batch = fetcher.fetch_news().await;
        assert_eq!(batch.source, "eastmoney");
    }
}
