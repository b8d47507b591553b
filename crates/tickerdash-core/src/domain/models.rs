use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime};

/// Placeholder for string fields the upstream left empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// Tone of an article or of the aggregate news flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Map an upstream label; anything unrecognized reads as neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote snapshot and key statistics for the current ticker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteInfo {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub price: f64,
    pub market_cap: f64,
    pub pe_ratio: f64,
    pub dividend_yield: f64,
    pub week_high_52: f64,
    pub week_low_52: f64,
    /// Never populated by the info endpoint; stays at zero.
    pub change: f64,
    /// Never populated by the info endpoint; stays at zero.
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Headquarters {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Headquarters {
    /// `city, state, country` over the non-empty parts.
    pub fn joined(&self) -> Option<String> {
        let parts = [&self.city, &self.state, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Company description block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub description: String,
    pub website: String,
    pub employee_count: String,
    pub headquarters: Headquarters,
    pub founded: String,
    pub ceo: String,
    pub exchange: String,
}

/// One point of the closing price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Short month/day label, e.g. `Jan 5`.
    pub label: String,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub publisher: String,
    pub sentiment: Sentiment,
    /// Label as sent upstream, used for display.
    pub sentiment_label: String,
    pub published_at: Option<UtcDateTime>,
}

/// Raw article counts per sentiment bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentCounts {
    pub const fn new(positive: u64, negative: u64, neutral: u64) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    /// Majority of positive vs negative; the neutral count never decides.
    pub fn classify(self) -> Sentiment {
        if self.positive > self.negative {
            Sentiment::Positive
        } else if self.negative > self.positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub overall: Sentiment,
    pub counts: SentimentCounts,
}

impl From<SentimentCounts> for SentimentSummary {
    fn from(counts: SentimentCounts) -> Self {
        Self {
            overall: counts.classify(),
            counts,
        }
    }
}

/// Everything a single fetch batch gathers for one ticker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub symbol: Symbol,
    pub quote: QuoteInfo,
    pub profile: CompanyProfile,
    pub history: Vec<HistoryPoint>,
    pub news: Vec<NewsArticle>,
    pub sentiment: SentimentSummary,
}

impl TickerSnapshot {
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }
}
