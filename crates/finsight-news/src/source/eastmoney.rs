//! Eastmoney fast-news adapter (secondary source)
//!
//! Envelope: `{ "code": 0, "data": { "fastNewsList": [ { "title",
//! "summary", "showTime": epoch-secs } ] } }`. Titles below the configured
//! minimum length are discarded as noise.

use crate::source::{NewsSource, split_epoch};
use crate::{FeedConfig, FeedError, Result};
use async_trait::async_trait;
use finsight_core::NewsRecord;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const NAME: &str = "eastmoney";
const FEED_PATH: &str = "/comm/web/getFastNewsList";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const REFERER: &str = "https://kuaixun.eastmoney.com/";

/// Adapter for Eastmoney's 7x24 fast-news column
pub struct EastmoneyFastNews {
    client: Client,
    base: String,
    max_records: usize,
    min_title_chars: usize,
}

impl EastmoneyFastNews {
    /// Build from the shared feed configuration
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.source_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: config.eastmoney_base.trim_end_matches('/').to_string(),
            max_records: config.max_records,
            min_title_chars: config.min_title_chars,
        })
    }
}

#[async_trait]
impl NewsSource for EastmoneyFastNews {
    async fn fetch(&self) -> Result<Vec<NewsRecord>> {
        let response = self
            .client
            .get(format!("{}{FEED_PATH}", self.base))
            .header("Referer", REFERER)
            .query(&[
                ("client", "web"),
                ("biz", "web_724"),
                ("fastColumn", "102"),
                ("sortEnd", ""),
                ("pageSize", "30"),
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
        if envelope.code != Some(0) {
            return Err(FeedError::envelope(
                NAME,
                format!("code field was {:?}", envelope.code),
            ));
        }
        let rows = envelope
            .data
            .and_then(|d| d.fast_news_list)
            .ok_or_else(|| FeedError::envelope(NAME, "missing data.fastNewsList"))?;

        debug!(rows = rows.len(), "eastmoney fast-news rows received");

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
    let title = row.title.map(|t| t.trim().to_string())?;
    if title.chars().count() < min_title_chars {
        return None;
    }
    let (date, time) = split_epoch(row.show_time?)?;

    let mut record = NewsRecord::new(title, date, time);
    if let Some(summary) = row.summary.filter(|s| !s.trim().is_empty()) {
        record = record.with_body(summary.trim());
    }
    Some(record)
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: Option<i64>,
    data: Option<Data>,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "fastNewsList")]
    fast_news_list: Option<Vec<Row>>,
}

#[derive(Debug, Deserialize)]
struct Row {
    title: Option<String>,
    summary: Option<String>,
    #[serde(rename = "showTime")]
    show_time: Option<i64>,
}
