//! Hardcoded seed batch for total-failure degraded mode
//!
//! When every live source fails, the UI still needs something to render.
//! The seed records are fixed, but their dates derive from the given clock
//! (today, yesterday, two days ago) so repeated failures read as recent
//! rather than stale. The batch is flagged `is_degraded` so monitoring can
//! tell it apart from a live fetch.

use chrono::{DateTime, Days, Local};
use finsight_core::{NewsBatch, NewsRecord};

/// Number of records in the seed batch
pub const SEED_LEN: usize = 3;

/// Label carried by seed batches in [`NewsBatch::source`]
pub const SEED_SOURCE: &str = "seed";

/// Build the degraded batch, timestamped relative to `now`
pub fn seed_batch(now: DateTime<Local>) -> NewsBatch {
    let date = |days_ago: u64| {
        now.checked_sub_days(Days::new(days_ago))
            .unwrap_or(now)
            .format("%Y-%m-%d")
            .to_string()
    };

    let records = vec![
        NewsRecord::new("市场观察：A股三大指数窄幅震荡，成交额维持万亿上方", date(0), "09:30")
            .with_body(
                "沪深两市早盘低开高走，板块轮动延续，资金面保持平稳。\
                 （当前为离线演示数据，实时行情请稍后刷新。）",
            ),
        NewsRecord::new("宏观政策：央行开展公开市场操作，维护流动性合理充裕", date(1), "10:15")
            .with_body(
                "央行通过逆回购操作投放短期流动性，市场利率运行平稳。\
                 （当前为离线演示数据，实时行情请稍后刷新。）",
            ),
        NewsRecord::new("行业动态：新能源与半导体产业链延续高景气度", date(2), "14:20")
            .with_body(
                "产业链上下游排产数据向好，机构关注度持续提升。\
                 （当前为离线演示数据，实时行情请稍后刷新。）",
            ),
    ];

    debug_assert_eq!(records.len(), SEED_LEN);
    NewsBatch::degraded(SEED_SOURCE, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_batch_shape() {
        let batch = seed_batch(Local::now());
        assert_eq!(batch.len(), SEED_LEN);
        assert!(batch.is_degraded);
        assert_eq!(batch.source, SEED_SOURCE);
        for record in &batch.records {
            assert!(!record.title.is_empty());
            assert!(record.body.is_some());
        }
    }

    #[test]
    fn test_seed_dates_are_non_increasing() {
        let batch = seed_batch(Local::now());
        let dates: Vec<&str> = batch
            .records
            .iter()
            .map(|r| r.published_date.as_str())
            .collect();
        for pair in dates.windows(2) {
            // ISO dates compare correctly as strings.
            assert!(pair[0] >= pair[1], "dates must not increase: {pair:?}");
        }
    }

    #[test]
    fn test_seed_is_deterministic_for_a_fixed_clock() {
        let now = Local::now();
        assert_eq!(seed_batch(now), seed_batch(now));
    }
}
