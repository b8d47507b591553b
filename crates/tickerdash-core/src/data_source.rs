//! Data source trait and request/response types.
//!
//! This module defines the contract (`DashboardSource`) the dashboard fetches
//! through, the five resources it fetches, and the structured error every
//! fetch reports.
//!
//! # Resources
//!
//! | Resource | Path | Response |
//! |----------|------|----------|
//! | Info | `/data/{symbol}/info` | [`QuoteInfo`] |
//! | History | `/data/{symbol}/history` | `Vec<`[`HistoryPoint`]`>` |
//! | News | `/data/{symbol}/news` | `Vec<`[`NewsArticle`]`>` |
//! | Sentiment | `/data/{symbol}/sentiment` | [`SentimentSummary`] |
//! | About | `/data/{symbol}/about` | [`CompanyProfile`] |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{
    CompanyProfile, HistoryPoint, Interval, NewsArticle, Period, QuoteInfo, SentimentSummary,
    Symbol,
};

/// One of the five per-ticker resources the dashboard loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Info,
    History,
    News,
    Sentiment,
    About,
}

impl Resource {
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::History,
        Self::News,
        Self::Sentiment,
        Self::About,
    ];

    /// Trailing path segment under `/data/{symbol}/`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::History => "history",
            Self::News => "news",
            Self::Sentiment => "sentiment",
            Self::About => "about",
        }
    }

    /// Banner text shown when this resource fails to load.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Info => "Error fetching stock info",
            Self::History => "Error fetching historical data",
            Self::News => "Error fetching news",
            Self::Sentiment => "Error fetching sentiment data",
            Self::About => "Error fetching company information",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The request never produced a response (connect, reset).
    Transport,
    /// The configured request timeout elapsed.
    Timeout,
    /// The upstream answered with a non-2xx status.
    Status,
    /// The body was not JSON or did not have the expected shape.
    Malformed,
}

/// Structured error reported by a single resource fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(status: u16, resource: Resource) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: format!("{resource} endpoint returned status {status}"),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Timeout,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::Timeout => "source.timeout",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Query parameters of the history resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub period: Period,
    pub interval: Interval,
}

impl HistoryRequest {
    pub const fn new(period: Period, interval: Interval) -> Self {
        Self { period, interval }
    }
}

/// Boxed future returned by every [`DashboardSource`] method.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Contract the dashboard fetches its five resources through.
///
/// Every method is independent: the dashboard issues all five at once and
/// waits for all of them, so implementations must not rely on call order.
///
/// Implementations must be `Send + Sync` as in-flight reloads share them.
pub trait DashboardSource: Send + Sync {
    /// Quote snapshot and key statistics.
    fn quote_info<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, QuoteInfo>;

    /// Closing price series, chronological as served.
    fn history<'a>(
        &'a self,
        symbol: &'a Symbol,
        request: HistoryRequest,
    ) -> SourceFuture<'a, Vec<HistoryPoint>>;

    /// Recent articles, in upstream order.
    fn news<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Vec<NewsArticle>>;

    /// Aggregate article tone.
    fn sentiment<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, SentimentSummary>;

    /// Company description block.
    fn company_profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, CompanyProfile>;
}
