use serde::Serialize;
use tracing::{debug, error};

use crate::data_source::{Resource, SourceError};
use crate::{
    CompanyProfile, HistoryPoint, NewsArticle, QuoteInfo, SentimentSummary, Symbol,
    TickerSnapshot,
};

/// Identifies one fetch batch. Only the latest batch may touch state.
pub type Generation = u64;

/// Loading flag and the single last-write-wins error banner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadState {
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Result of one of the five fetches of a batch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Info(Result<QuoteInfo, SourceError>),
    History(Result<Vec<HistoryPoint>, SourceError>),
    News(Result<Vec<NewsArticle>, SourceError>),
    Sentiment(Result<SentimentSummary, SourceError>),
    Profile(Result<CompanyProfile, SourceError>),
}

impl FetchOutcome {
    pub const fn resource(&self) -> Resource {
        match self {
            Self::Info(_) => Resource::Info,
            Self::History(_) => Resource::History,
            Self::News(_) => Resource::News,
            Self::Sentiment(_) => Resource::Sentiment,
            Self::Profile(_) => Resource::About,
        }
    }
}

/// View state of the ticker dashboard.
///
/// Mutated only through the transition methods below; rendering reads it
/// through [`crate::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    ticker: Symbol,
    search_text: String,
    generation: Generation,
    load: LoadState,
    data: TickerSnapshot,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Symbol::default())
    }
}

impl DashboardState {
    /// Fresh state for `ticker`. It reads as loading until the first batch
    /// completes.
    pub fn new(ticker: Symbol) -> Self {
        Self {
            data: TickerSnapshot::empty(ticker.clone()),
            ticker,
            search_text: String::new(),
            generation: 0,
            load: LoadState {
                is_loading: true,
                error: None,
            },
        }
    }

    pub fn ticker(&self) -> &Symbol {
        &self.ticker
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub const fn is_loading(&self) -> bool {
        self.load.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.load.error.as_deref()
    }

    pub fn data(&self) -> &TickerSnapshot {
        &self.data
    }

    pub fn set_ticker(&mut self, ticker: Symbol) {
        self.ticker = ticker;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Start a new batch for the current ticker: loading on, error cleared,
    /// every data slice reset. Earlier batches become stale.
    pub fn begin_load(&mut self) -> (Generation, Symbol) {
        self.generation = self.generation.wrapping_add(1);
        self.load = LoadState {
            is_loading: true,
            error: None,
        };
        self.data = TickerSnapshot::empty(self.ticker.clone());
        (self.generation, self.ticker.clone())
    }

    /// Apply one fetch result of batch `generation`.
    ///
    /// Returns `false` when the batch is stale and nothing changed. A failed
    /// fetch replaces the error banner with its resource's message.
    pub fn apply_fetch_result(&mut self, generation: Generation, outcome: FetchOutcome) -> bool {
        let resource = outcome.resource();
        if generation != self.generation {
            debug!(
                %resource,
                generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        match outcome {
            FetchOutcome::Info(Ok(quote)) => self.data.quote = quote,
            FetchOutcome::History(Ok(points)) => self.data.history = points,
            FetchOutcome::News(Ok(articles)) => self.data.news = articles,
            FetchOutcome::Sentiment(Ok(summary)) => self.data.sentiment = summary,
            FetchOutcome::Profile(Ok(profile)) => self.data.profile = profile,
            FetchOutcome::Info(Err(source))
            | FetchOutcome::History(Err(source))
            | FetchOutcome::News(Err(source))
            | FetchOutcome::Sentiment(Err(source))
            | FetchOutcome::Profile(Err(source)) => {
                error!(
                    %resource,
                    symbol = %self.ticker,
                    code = source.code(),
                    detail = source.message(),
                    "fetch failed"
                );
                self.set_error(resource.failure_message());
            }
        }
        true
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.load.error = Some(message.into());
    }

    /// Close batch `generation`; a stale batch leaves the loading flag alone.
    pub fn finish_load(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale batch finished");
            return false;
        }
        self.load.is_loading = false;
        debug!(generation, symbol = %self.ticker, "batch finished");
        true
    }
}
