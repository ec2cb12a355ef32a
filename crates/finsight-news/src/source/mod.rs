//! Source adapters for upstream news providers
//!
//! Each adapter owns exactly one provider protocol: it validates the outer
//! response envelope before reading into it, maps provider fields into
//! [`NewsRecord`]s, and fails fast with a [`crate::FeedError`] on any
//! mismatch. The fallback chain treats every failure the same way, so
//! adapters never need to recover on their own.

pub mod cls;
pub mod eastmoney;
pub mod sina;

pub use cls::ClsTelegraph;
pub use eastmoney::EastmoneyFastNews;
pub use sina::SinaLive;

use crate::Result;
use async_trait::async_trait;
use chrono::{Local, TimeZone};
use finsight_core::NewsRecord;

#[cfg(test)]
use mockall::automock;

/// One upstream news provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch and normalize the provider's default feed
    ///
    /// Returns records in the provider's own order (reverse-chronological
    /// by convention). Any failure, including an empty feed, is an error;
    /// the chain decides what happens next.
    async fn fetch(&self) -> Result<Vec<NewsRecord>>;

    /// Adapter name, used as the batch's source label
    fn name(&self) -> &str;
}

/// Convert provider epoch seconds into local date/time strings
///
/// Returns `None` for timestamps outside chrono's representable range, so
/// adapters can drop the row instead of inventing a time.
pub(crate) fn split_epoch(epoch_secs: i64) -> Option<(String, String)> {
    let local = Local.timestamp_opt(epoch_secs, 0).single()?;
    Some((
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M").to_string(),
    ))
}

/// Split a "YYYY-MM-DD HH:MM:SS" wall-clock string into date and HH:MM
///
/// Rejects anything not shaped like a zero-padded two-digit-hour time, so
/// "9:41:27" is dropped rather than mangled into "9:41:".
pub(crate) fn split_datetime(s: &str) -> Option<(String, String)> {
    let (date, time) = s.trim().split_once(' ')?;
    if date.len() != 10 {
        return None;
    }
    let hhmm = time.get(..5)?;
    let bytes = hhmm.as_bytes();
    let digits_around_colon = bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !digits_around_colon {
        return None;
    }
    Some((date.to_string(), hhmm.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_epoch_formats() {
        let (date, time) = split_epoch(1_700_000_000).expect("valid epoch");
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }

    #[test]
    fn test_split_epoch_out_of_range() {
        assert!(split_epoch(i64::MAX).is_none());
    }

    #[test]
    fn test_split_datetime() {
        let (date, time) = split_datetime("2025-11-03 09:41:27").expect("parses");
        assert_eq!(date, "2025-11-03");
        assert_eq!(time, "09:41");
    }

    #[test]
    fn test_split_datetime_rejects_garbage() {
        assert!(split_datetime("not a timestamp").is_none());
        assert!(split_datetime("2025-11-03").is_none());
    }

    #[test]
    fn test_split_datetime_rejects_unpadded_hour() {
        assert!(split_datetime("2025-11-03 9:41:27").is_none());
        assert!(split_datetime("2025-11-03 ab:cd:ef").is_none());
    }
}
