//! # Domain Models
//!
//! Typed view of the data the dashboard shows for one ticker.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase ticker symbol |
//! | [`QuoteInfo`] | Price and key statistics |
//! | [`CompanyProfile`] | Description, website, headquarters, leadership |
//! | [`HistoryPoint`] | One labelled closing price |
//! | [`NewsArticle`] | Headline with publisher and tone |
//! | [`SentimentSummary`] | Overall tone derived from article counts |
//! | [`TickerSnapshot`] | All of the above for one fetch batch |
//! | [`Interval`] / [`Period`] | History query parameters |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Upstream payloads are decoded leniently in [`crate::adapters`]; the types
//! here always hold concrete values (missing numbers are zero, missing
//! strings empty or `N/A`).

mod interval;
mod models;
mod symbol;
mod timestamp;

pub use interval::{Interval, Period};
pub use models::{
    CompanyProfile, Headquarters, HistoryPoint, NewsArticle, QuoteInfo, Sentiment,
    SentimentCounts, SentimentSummary, TickerSnapshot, NOT_AVAILABLE,
};
pub use symbol::{Symbol, DEFAULT_SYMBOL};
pub use timestamp::{calendar_date, UtcDateTime};
