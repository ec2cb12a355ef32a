//! Canonical record shapes for the news pipeline
//!
//! A fetch cycle produces a [`NewsBatch`] of [`NewsRecord`]s; an analysis
//! request pairs one record with an [`AnalysisKind`] and yields an
//! [`AnalysisResult`]. Records are addressed by position within their batch,
//! never by identity - titles are not required to be unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single normalized news item
///
/// Every source adapter maps its provider-specific payload into this shape.
/// `title` is always non-empty (adapters reject rows without one); `body`
/// is optional because some feeds only carry headlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Headline text, non-empty
    pub title: String,
    /// Publication date, e.g. "2025-11-03"
    pub published_date: String,
    /// Publication time, e.g. "09:41"
    pub published_time: String,
    /// Full text of the item, when the feed provides one
    pub body: Option<String>,
}

impl NewsRecord {
    /// Create a record without a body
    pub fn new(
        title: impl Into<String>,
        published_date: impl Into<String>,
        published_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published_date: published_date.into(),
            published_time: published_time.into(),
            body: None,
        }
    }

    /// Attach the full text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Body text, or an empty string for headline-only items
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// One fetch cycle's worth of records, in display order
///
/// Produced atomically by the fallback fetcher. Insertion order is
/// significant (sources deliver reverse-chronological feeds by convention;
/// this is assumed, not verified). `source` names the adapter that produced
/// the batch, or `"seed"` for the hardcoded degraded batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsBatch {
    /// Ordered records; position is the addressing scheme
    pub records: Vec<NewsRecord>,
    /// Name of the adapter that produced this batch
    pub source: String,
    /// True when this is the hardcoded seed batch, not live data
    pub is_degraded: bool,
}

impl NewsBatch {
    /// A batch produced by a live source
    pub fn live(source: impl Into<String>, records: Vec<NewsRecord>) -> Self {
        Self {
            records,
            source: source.into(),
            is_degraded: false,
        }
    }

    /// A degraded batch served because every live source failed
    pub fn degraded(source: impl Into<String>, records: Vec<NewsRecord>) -> Self {
        Self {
            records,
            source: source.into(),
            is_degraded: true,
        }
    }

    /// Positional read; `None` when the index is out of range
    pub fn get(&self, index: usize) -> Option<&NewsRecord> {
        self.records.get(index)
    }

    /// Headlines in display order
    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }

    /// Number of records in the batch
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The four supported analysis angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Which industry chains / concept sectors benefit
    Concept,
    /// Leading listed companies most exposed to the news
    RelatedStocks,
    /// One-line read of the capital-market impact
    MarketImpact,
    /// Actionable takeaways with explicit risk caveats
    InvestmentAdvice,
}

impl AnalysisKind {
    /// All kinds, in the order they are presented to users
    pub const ALL: [Self; 4] = [
        Self::Concept,
        Self::RelatedStocks,
        Self::MarketImpact,
        Self::InvestmentAdvice,
    ];

    /// Stable string tag, also used as the template name suffix
    pub fn tag(self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::RelatedStocks => "related_stocks",
            Self::MarketImpact => "market_impact",
            Self::InvestmentAdvice => "investment_advice",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for AnalysisKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concept" => Ok(Self::Concept),
            "related_stocks" | "stocks" => Ok(Self::RelatedStocks),
            "market_impact" | "impact" => Ok(Self::MarketImpact),
            "investment_advice" | "advice" => Ok(Self::InvestmentAdvice),
            other => Err(crate::Error::Generic(format!(
                "unknown analysis kind: {other}"
            ))),
        }
    }
}

/// A single analysis request, constructed fresh per user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The record being analyzed
    pub record: NewsRecord,
    /// Which angle to analyze it from
    pub kind: AnalysisKind,
}

impl AnalysisRequest {
    pub fn new(record: NewsRecord, kind: AnalysisKind) -> Self {
        Self { record, kind }
    }
}

/// The outcome surfaced back to the caller
///
/// `text` is either the model's answer or a human-readable failure message;
/// at this boundary failures are plain text, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Model output, or a diagnostic string when the call failed
    pub text: String,
    /// The angle that was requested
    pub kind: AnalysisKind,
    /// Title of the record the analysis was built from
    pub source_title: String,
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        text: impl Into<String>,
        kind: AnalysisKind,
        source_title: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            source_title: source_title.into(),
            timestamp: Utc::now(),
        }
    }
}
