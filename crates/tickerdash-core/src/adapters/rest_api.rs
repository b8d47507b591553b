use std::sync::Arc;

use tracing::debug;

use super::payload;
use crate::config::DashboardConfig;
use crate::data_source::{DashboardSource, HistoryRequest, Resource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{CompanyProfile, HistoryPoint, NewsArticle, QuoteInfo, SentimentSummary, Symbol};

/// Dashboard source backed by the `/api/v1/data/{symbol}/...` JSON API.
#[derive(Clone)]
pub struct RestApiAdapter {
    base_url: String,
    timeout_ms: Option<u64>,
    http_client: Arc<dyn HttpClient>,
}

impl RestApiAdapter {
    /// Adapter over a real network client.
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: &DashboardConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: config.base_url().to_owned(),
            timeout_ms: config.timeout_ms(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/data/{symbol}/{resource}`, with the symbol percent-encoded.
    pub fn resource_url(&self, symbol: &Symbol, resource: Resource) -> String {
        format!(
            "{}/data/{}/{}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            resource.as_str()
        )
    }

    async fn fetch_body(&self, url: String, resource: Resource) -> Result<String, SourceError> {
        debug!(%url, %resource, "requesting dashboard resource");
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.timed_out() {
                SourceError::timeout(format!("{resource} timed out: {}", error.message()))
            } else {
                SourceError::transport(format!("{resource} transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            return Err(SourceError::status(response.status, resource));
        }

        Ok(response.body)
    }
}

impl std::fmt::Debug for RestApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApiAdapter")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl DashboardSource for RestApiAdapter {
    fn quote_info<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, QuoteInfo> {
        Box::pin(async move {
            let url = self.resource_url(symbol, Resource::Info);
            let body = self.fetch_body(url, Resource::Info).await?;
            payload::decode_quote_info(&body)
        })
    }

    fn history<'a>(
        &'a self,
        symbol: &'a Symbol,
        request: HistoryRequest,
    ) -> SourceFuture<'a, Vec<HistoryPoint>> {
        Box::pin(async move {
            let url = format!(
                "{}?period={}&interval={}",
                self.resource_url(symbol, Resource::History),
                request.period,
                request.interval
            );
            let body = self.fetch_body(url, Resource::History).await?;
            payload::decode_history(&body)
        })
    }

    fn news<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, Vec<NewsArticle>> {
        Box::pin(async move {
            let url = self.resource_url(symbol, Resource::News);
            let body = self.fetch_body(url, Resource::News).await?;
            payload::decode_news(&body)
        })
    }

    fn sentiment<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, SentimentSummary> {
        Box::pin(async move {
            let url = self.resource_url(symbol, Resource::Sentiment);
            let body = self.fetch_body(url, Resource::Sentiment).await?;
            payload::decode_sentiment(&body)
        })
    }

    fn company_profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, CompanyProfile> {
        Box::pin(async move {
            let url = self.resource_url(symbol, Resource::About);
            let body = self.fetch_body(url, Resource::About).await?;
            payload::decode_company_profile(&body)
        })
    }
}
