//! Sina 7x24 live-feed adapter (tertiary source)
//!
//! The deepest envelope of the three:
//! `result.status.code == 0`, rows under `result.data.feed.list`. Each row
//! carries free text in `rich_text`; a leading 【bracketed】 segment is the
//! headline and the remainder becomes the body.

use crate::source::{NewsSource, split_datetime};
use crate::{FeedConfig, FeedError, Result};
use async_trait::async_trait;
use finsight_core::NewsRecord;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

const NAME: &str = "sina";
const FEED_PATH: &str = "/api/zhibo/feed";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const REFERER: &str = "https://finance.sina.com.cn/7x24/";

static HEADLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^【([^】]+)】").expect("headline pattern is valid"));

/// Adapter for Sina's 7x24 finance live feed
pub struct SinaLive {
    client: Client,
    base: String,
    max_records: usize,
    min_title_chars: usize,
}

impl SinaLive {
    /// Build from the shared feed configuration
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.source_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: config.sina_base.trim_end_matches('/').to_string(),
            max_records: config.max_records,
            min_title_chars: config.min_title_chars,
        })
    }
}

#[async_trait]
impl NewsSource for SinaLive {
    async fn fetch(&self) -> Result<Vec<NewsRecord>> {
        let response = self
            .client
            .get(format!("{}{FEED_PATH}", self.base))
            .header("Referer", REFERER)
            .query(&[
                ("page", "1"),
                ("page_size", "30"),
                ("zhibo_id", "152"),
                ("tag_id", "0"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                source_name: NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: Envelope = response.json().await?;
        let result = envelope
            .result
            .ok_or_else(|| FeedError::envelope(NAME, "missing result"))?;
        let code = result.status.as_ref().and_then(|s| s.code);
        if code != Some(0) {
            return Err(FeedError::envelope(
                NAME,
                format!("status.code was {code:?}"),
            ));
        }
        let rows = result
            .data
            .and_then(|d| d.feed)
            .and_then(|f| f.list)
            .ok_or_else(|| FeedError::envelope(NAME, "missing data.feed.list"))?;

        debug!(rows = rows.len(), "sina live rows received");

        let min_chars = self.min_title_chars;
        let records: Vec<NewsRecord> = rows
            .into_iter()
            .filter_map(|row| into_record(row, min_chars))
            .take(self.max_records)
            .collect();

        if records.is_empty() {
            return Err(FeedError::empty(NAME));
        }
        Ok(records)
    }

    fn name(&self) -> &str {
        NAME
    }
}

fn into_record(row: Row, min_title_chars: usize) -> Option<NewsRecord> {
    let text = row.rich_text.map(|t| t.trim().to_string())?;
    let (date, time) = split_datetime(row.create_time.as_deref()?)?;

    let (title, body) = match HEADLINE.captures(&text) {
        Some(caps) => {
            let title = caps.get(1)?.as_str().trim().to_string();
            let body = text[caps.get(0)?.end()..].trim().to_string();
            (title, Some(body).filter(|b| !b.is_empty()))
        }
        // No bracketed headline: the whole flash doubles as the title.
        None => (text, None),
    };

    if title.chars().count() < min_title_chars {
        return None;
    }

    let mut record = NewsRecord::new(title, date, time);
    if let Some(body) = body {
        record = record.with_body(body);
    }
    Some(record)
}

#[derive(Debug, Deserialize)]
struct Envelope {
    result: Option<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    status: Option<WireStatus>,
    data: Option<WireData>,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    code: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireData {
    feed: Option<WireFeed>,
}

#[derive(Debug, Deserialize)]
struct WireFeed {
    list: Option<Vec<Row>>,
}

#[derive(Debug, Deserialize)]
struct Row {
    rich_text: Option<String>,
    create_time: Option<String>,
}
