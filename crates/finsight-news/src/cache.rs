//! Single-slot TTL cache for the current news batch
//!
//! There is exactly one logical query (the provider's default feed), so the
//! cache holds at most one entry. The slot's mutex stays held across the
//! miss path: concurrent misses coalesce into a single upstream fetch and
//! the rest await its result.

use finsight_core::NewsBatch;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheEntry {
    batch: NewsBatch,
    fetched_at: Instant,
}

/// Time-bounded memoization of the fetch outcome
///
/// One instance is constructed per process and injected wherever it is
/// needed; there is no implicit global. A degraded seed batch is cached
/// exactly like a live one - serving it until expiry is accepted behavior,
/// the point is bounding the upstream call rate.
pub struct BatchCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl BatchCache {
    /// Empty cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// Configured TTL
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached batch, fetching on absence or expiry
    ///
    /// `now` is passed in so expiry is testable without sleeping; callers
    /// outside tests pass `Instant::now()`.
    pub async fn get_or_fetch<F, Fut>(&self, now: Instant, fetcher: F) -> NewsBatch
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = NewsBatch>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if now.saturating_duration_since(entry.fetched_at) < self.ttl {
                debug!(source = %entry.batch.source, "news cache hit");
                return entry.batch.clone();
            }
            debug!("news cache entry expired");
        }

        let batch = fetcher().await;
        *slot = Some(CacheEntry {
            batch: batch.clone(),
            fetched_at: now,
        });
        batch
    }

    /// Drop the cached entry so the next read fetches regardless of TTL
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
        debug!("news cache cleared");
    }

    /// Whether a valid entry is currently held
    pub async fn is_fresh(&self, now: Instant) -> bool {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .is_some_and(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::NewsRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn batch(source: &str) -> NewsBatch {
        NewsBatch::live(
            source,
            vec![NewsRecord::new("标题内容", "2025-11-03", "09:41")],
        )
    }

    #[tokio::test]
    async fn test_hit_within_ttl_fetches_once() {
        let cache = BatchCache::new(Duration::from_secs(600));
        let calls = AtomicUsize::new(0);
        let now = Instant::now();

        let first = cache
            .get_or_fetch(now, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { batch("cls") }
            })
            .await;
        let second = cache
            .get_or_fetch(now + Duration::from_secs(599), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { batch("eastmoney") }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(second.source, "cls");
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let cache = BatchCache::new(Duration::from_secs(600));
        let now = Instant::now();

        cache.get_or_fetch(now, || async { batch("cls") }).await;
        let later = cache
            .get_or_fetch(now + Duration::from_secs(600), || async {
                batch("eastmoney")
            })
            .await;

        assert_eq!(later.source, "eastmoney");
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let cache = BatchCache::new(Duration::from_secs(600));
        let calls = AtomicUsize::new(0);
        let now = Instant::now();

        cache
            .get_or_fetch(now, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { batch("cls") }
            })
            .await;
        cache.clear().await;
        cache
            .get_or_fetch(now, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { batch("cls") }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_degraded_batch_is_cached_like_any_other() {
        let cache = BatchCache::new(Duration::from_secs(600));
        let now = Instant::now();

        let seeded = NewsBatch::degraded(
            "seed",
            vec![NewsRecord::new("降级标题", "2025-11-03", "09:41")],
        );
        let stored = seeded.clone();
        cache.get_or_fetch(now, || async move { stored }).await;

        let hit = cache
            .get_or_fetch(now + Duration::from_secs(1), || async {
                panic!("must not refetch within TTL")
            })
            .await;
        assert!(hit.is_degraded);
        assert_eq!(hit, seeded);
    }

    #[tokio::test]
    async fn test_is_fresh() {
        let cache = BatchCache::new(Duration::from_secs(600));
        let now = Instant::now();
        assert!(!cache.is_fresh(now).await);

        cache.get_or_fetch(now, || async { batch("cls") }).await;
        assert!(cache.is_fresh(now).await);
        assert!(!cache.is_fresh(now + Duration::from_secs(601)).await);

        cache.clear().await;
        assert!(!cache.is_fresh(now).await);
    }
}
