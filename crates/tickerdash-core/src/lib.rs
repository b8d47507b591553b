//! # Tickerdash Core
//!
//! Data, fetch orchestration and presentation for a single-ticker stock
//! dashboard backed by a JSON HTTP API.
//!
//! ## Overview
//!
//! - **Domain models** for quotes, price history, news and sentiment
//! - **Data source trait** with a REST adapter over a pluggable HTTP client
//! - **Dashboard controller** that fetches five resources per ticker and
//!   aggregates them into one view state
//! - **Pure renderer** from state to a serializable view tree
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | REST adapter and payload schemas |
//! | [`config`] | Base URL, timeout and history settings |
//! | [`dashboard`] | State machine, reload orchestration, rendering |
//! | [`data_source`] | Data source trait, resources, source errors |
//! | [`domain`] | Domain models (Symbol, QuoteInfo, NewsArticle, ...) |
//! | [`error`] | Core error types |
//! | [`format`] | Price, market cap and date formatting |
//! | [`http_client`] | HTTP client abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerdash_core::{Dashboard, DashboardConfig, RestApiAdapter, View};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::builder().build()?;
//!     let dashboard = Dashboard::new(Arc::new(RestApiAdapter::new(&config)));
//!
//!     dashboard.reload().await;
//!     if let Some(task) = dashboard.submit_search("msft")? {
//!         task.await;
//!     }
//!
//!     match dashboard.view() {
//!         View::Dashboard(view) => println!("{}", view.header),
//!         View::Error { message } => eprintln!("{message}"),
//!         View::Loading => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │ submit_search
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Dashboard      │────▶│ DashboardState   │──▶ render ──▶ View
//! └────────┬────────┘     └──────────────────┘
//!          │ 5 concurrent fetches
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ DashboardSource │────▶│ HTTP Client      │
//! │ (RestApiAdapter)│     │ (reqwest/mock)   │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! A failed fetch never aborts the batch. It is logged and replaces the
//! view's error banner with a per-resource message:
//!
//! ```rust
//! use tickerdash_core::{Resource, SourceError, SourceErrorKind};
//!
//! let error = SourceError::status(502, Resource::News);
//! assert_eq!(error.kind(), SourceErrorKind::Status);
//! assert_eq!(Resource::News.failure_message(), "Error fetching news");
//! ```

pub mod adapters;
pub mod config;
pub mod dashboard;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;

// Adapter implementations
pub use adapters::RestApiAdapter;

// Configuration
pub use config::{DashboardConfig, DashboardConfigBuilder, DEFAULT_BASE_URL};

// Dashboard controller and view tree
pub use dashboard::{
    render, Dashboard, DashboardState, DashboardView, FetchOutcome, Generation, Icon, LoadState,
    ReloadReport, ReloadTask, View,
};

// Data source trait and types
pub use data_source::{
    DashboardSource, HistoryRequest, Resource, SourceError, SourceErrorKind, SourceFuture,
};

// Domain models
pub use domain::{
    calendar_date, CompanyProfile, Headquarters, HistoryPoint, Interval, NewsArticle, Period,
    QuoteInfo, Sentiment, SentimentCounts, SentimentSummary, Symbol, TickerSnapshot, UtcDateTime,
    DEFAULT_SYMBOL, NOT_AVAILABLE,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, MockHttpClient, ReqwestHttpClient,
};
