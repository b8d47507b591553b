//! Ticker dashboard controller.
//!
//! [`Dashboard`] owns the shared [`DashboardState`] and the source it fetches
//! from. Every reload issues the five resource fetches together, applies each
//! result as it arrives and closes the batch once all five have finished.
//! Batches are tagged with a generation so a slow batch for a previous ticker
//! can never overwrite the current one.

mod state;
mod view;

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::info;

use crate::data_source::{DashboardSource, HistoryRequest};
use crate::error::ValidationError;
use crate::Symbol;

pub use state::{DashboardState, FetchOutcome, Generation, LoadState};
pub use view::{
    render, AboutView, ChartPoint, ChartView, DashboardView, Icon, KeyStat, NewsCard,
    NewsSection, OverviewView, SentimentLine, View, LOADING_TEXT, NO_DESCRIPTION_TEXT,
    NO_NEWS_TEXT, UNKNOWN_DATE_TEXT,
};

/// How a reload batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadReport {
    pub symbol: Symbol,
    pub generation: Generation,
    /// `false` when a newer batch started before this one finished.
    pub current: bool,
}

/// A started reload. State already shows it as loading; the fetches run
/// when the task is polled.
pub type ReloadTask = BoxFuture<'static, ReloadReport>;

#[derive(Clone)]
pub struct Dashboard {
    source: Arc<dyn DashboardSource>,
    state: Arc<Mutex<DashboardState>>,
    history: HistoryRequest,
}

impl Dashboard {
    /// Dashboard on the default ticker.
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        Self::with_ticker(source, Symbol::default())
    }

    pub fn with_ticker(source: Arc<dyn DashboardSource>, ticker: Symbol) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(DashboardState::new(ticker))),
            history: HistoryRequest::default(),
        }
    }

    /// Period and interval of the history fetch.
    pub fn with_history(mut self, history: HistoryRequest) -> Self {
        self.history = history;
        self
    }

    pub fn ticker(&self) -> Symbol {
        self.state.lock().ticker().clone()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    pub fn view(&self) -> View {
        render(&self.state.lock())
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.state.lock().set_search_text(text);
    }

    /// Switch to the ticker typed in `text` and start reloading it.
    ///
    /// Blank input does nothing and returns `Ok(None)`. Input that is not a
    /// valid symbol is returned as an error and leaves state untouched.
    pub fn submit_search(&self, text: &str) -> Result<Option<ReloadTask>, ValidationError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let symbol = Symbol::parse(text)?;
        {
            let mut state = self.state.lock();
            state.set_ticker(symbol);
            state.set_search_text("");
        }
        Ok(Some(self.reload()))
    }

    /// Start a fetch batch for the current ticker.
    pub fn reload(&self) -> ReloadTask {
        let (generation, symbol) = self.state.lock().begin_load();
        info!(%symbol, generation, "reloading dashboard");

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let history = self.history;

        async move {
            run_batch(source.as_ref(), &state, generation, &symbol, history).await;
            let current = state.lock().finish_load(generation);
            ReloadReport {
                symbol,
                generation,
                current,
            }
        }
        .boxed()
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &*self.state.lock())
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

async fn run_batch(
    source: &dyn DashboardSource,
    state: &Mutex<DashboardState>,
    generation: Generation,
    symbol: &Symbol,
    history: HistoryRequest,
) {
    let mut pending: FuturesUnordered<BoxFuture<'_, FetchOutcome>> = FuturesUnordered::new();
    pending.push(async move { FetchOutcome::Info(source.quote_info(symbol).await) }.boxed());
    pending.push(
        async move { FetchOutcome::History(source.history(symbol, history).await) }.boxed(),
    );
    pending.push(async move { FetchOutcome::News(source.news(symbol).await) }.boxed());
    pending.push(async move { FetchOutcome::Sentiment(source.sentiment(symbol).await) }.boxed());
    pending
        .push(async move { FetchOutcome::Profile(source.company_profile(symbol).await) }.boxed());

    while let Some(outcome) = pending.next().await {
        state.lock().apply_fetch_result(generation, outcome);
    }
}
