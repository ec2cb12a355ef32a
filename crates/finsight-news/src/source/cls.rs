//! CLS telegraph adapter (primary source)
//!
//! Cailianshe's rolling telegraph feed. The envelope is
//! `{ "error": 0, "data": { "roll_data": [ ... ] } }`; a non-zero `error`
//! or missing `data` is an envelope mismatch, not a parse error.

use crate::source::{NewsSource, split_epoch};
use crate::{FeedConfig, FeedError, Result};
use async_trait::async_trait;
use finsight_core::NewsRecord;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const NAME: &str = "cls";
const FEED_PATH: &str = "/nodeapi/telegraphList";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Adapter for the CLS telegraph feed
pub struct ClsTelegraph {
    client: Client,
    base: String,
    referer: String,
    max_records: usize,
}

impl ClsTelegraph {
    /// Build from the shared feed configuration
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.source_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: config.cls_base.trim_end_matches('/').to_string(),
            referer: format!("{}/telegraph", config.cls_base.trim_end_matches('/')),
            max_records: config.max_records,
        })
    }
}

#[async_trait]
impl NewsSource for ClsTelegraph {
    async fn fetch(&self) -> Result<Vec<NewsRecord>> {
        let response = self
            .client
            .get(format!("{}{FEED_PATH}", self.base))
            .header("Referer", &self.referer)
            .query(&[
                ("app", "CailianpressWeb"),
                ("os", "web"),
                ("sv", "8.4.6"),
                ("rn", "30"),
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
        if envelope.error != Some(0) {
            return Err(FeedError::envelope(
                NAME,
                format!("error field was {:?}", envelope.error),
            ));
        }
        let rows = envelope
            .data
            .and_then(|d| d.roll_data)
            .ok_or_else(|| FeedError::envelope(NAME, "missing data.roll_data"))?;

        debug!(rows = rows.len(), "cls telegraph rows received");

        let records: Vec<NewsRecord> = rows
            .into_iter()
            .filter_map(into_record)
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

fn into_record(row: Row) -> Option<NewsRecord> {
    let title = row
        .title
        .filter(|t| !t.trim().is_empty())
        // Headline-less telegraph flashes carry their text in `brief`.
        .or_else(|| row.brief.clone().filter(|b| !b.trim().is_empty()))?;
    let (date, time) = split_epoch(row.ctime?)?;

    let body = row
        .content
        .or(row.brief)
        .filter(|b| !b.trim().is_empty() && *b != title);

    let mut record = NewsRecord::new(title.trim(), date, time);
    if let Some(body) = body {
        record = record.with_body(body.trim());
    }
    Some(record)
}

#[derive(Debug, Deserialize)]
struct Envelope {
    error: Option<i64>,
    data: Option<Data>,
}

#[derive(Debug, Deserialize)]
struct Data {
    roll_data: Option<Vec<Row>>,
}

#[derive(Debug, Deserialize)]
struct Row {
    title: Option<String>,
    brief: Option<String>,
    content: Option<String>,
    ctime: Option<i64>,
}
