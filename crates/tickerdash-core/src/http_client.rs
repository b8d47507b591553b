use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

/// GET request envelope used by adapter transport calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// `None` waits for the upstream indefinitely.
    pub timeout_ms: Option<u64>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// HTTP response envelope returned by an adapter transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    timed_out: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn timed_out(&self) -> bool {
        self.timed_out
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Adapter transport contract.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production HTTP client using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(concat!("tickerdash/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.client.get(&request.url);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            if let Some(timeout_ms) = request.timeout_ms {
                builder = builder.timeout(std::time::Duration::from_millis(timeout_ms));
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::timeout(format!("request timeout: {}", e))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {}", e))
                } else {
                    HttpError::new(format!("request failed: {}", e))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {}", e)))?;

            Ok(HttpResponse { status, body })
        })
    }
}

type RouteHandler = Arc<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync>;

/// In-process transport answering from a route table.
///
/// Routes match when their pattern occurs in the request URL; the first
/// registered match wins. Unmatched requests get a 404. Every request is
/// recorded.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    routes: Vec<(String, RouteHandler)>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(
        self,
        pattern: impl Into<String>,
        response: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.with_handler(pattern, move |_| response.clone())
    }

    pub fn with_json(self, pattern: impl Into<String>, body: serde_json::Value) -> Self {
        self.with_route(pattern, Ok(HttpResponse::ok_json(body.to_string())))
    }

    pub fn with_handler<F>(mut self, pattern: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        self.routes.push((pattern.into(), Arc::new(handler)));
        self
    }

    /// Deterministic demo payloads for any symbol, for offline runs.
    pub fn demo() -> Self {
        Self::new()
            .with_handler("/info", |request| {
                let symbol = symbol_from_url(&request.url);
                let seed = symbol_seed(&symbol);
                let price = 92.0 + (seed % 500) as f64 / 10.0;
                Ok(HttpResponse::ok_json(
                    json!({
                        "symbol": symbol,
                        "name": format!("{symbol} Holdings Inc."),
                        "sector": "Technology",
                        "industry": "Consumer Electronics",
                        "current_price": price,
                        "market_cap": 500_000_000_000.0 + (seed % 300_000) as f64 * 1_000_000.0,
                        "pe_ratio": 14.0 + (seed % 200) as f64 / 10.0,
                        "dividend_yield": 0.005 + (seed % 50) as f64 / 10_000.0,
                        "52_week_high": price * 1.18,
                        "52_week_low": price * 0.74,
                    })
                    .to_string(),
                ))
            })
            .with_handler("/history", |request| {
                let symbol = symbol_from_url(&request.url);
                let seed = symbol_seed(&symbol);
                let base = 92.0 + (seed % 500) as f64 / 10.0;
                let data = (1..=22)
                    .map(|day| {
                        let drift = ((seed + day) % 7) as f64 - 3.0;
                        json!({
                            "Date": format!("2024-01-{day:02}"),
                            "Close": format!("{:.2}", base + drift + day as f64 * 0.15),
                        })
                    })
                    .collect::<Vec<_>>();
                Ok(HttpResponse::ok_json(json!({ "data": data }).to_string()))
            })
            .with_handler("/news", |request| {
                let symbol = symbol_from_url(&request.url);
                Ok(HttpResponse::ok_json(
                    json!({
                        "articles": [
                            {
                                "title": format!("{symbol} beats quarterly estimates"),
                                "publisher": "Market Wire",
                                "sentiment": "positive",
                                "published": "2024-01-22T13:30:00Z",
                            },
                            {
                                "title": format!("Analysts split on {symbol} guidance"),
                                "publisher": "Daily Ledger",
                                "sentiment": "neutral",
                                "published": "2024-01-21 09:00:00",
                            },
                            {
                                "title": format!("Supply concerns weigh on {symbol}"),
                                "publisher": "Street Journal",
                                "sentiment": "negative",
                                "published": 1705741200,
                            },
                        ]
                    })
                    .to_string(),
                ))
            })
            .with_json(
                "/sentiment",
                json!({ "sentiment_analysis": { "positive": 4, "negative": 2, "neutral": 3 } }),
            )
            .with_handler("/about", |request| {
                let symbol = symbol_from_url(&request.url);
                Ok(HttpResponse::ok_json(
                    json!({
                        "description": format!("{symbol} designs and sells consumer hardware and services."),
                        "website": format!("https://www.{}.example", symbol.to_ascii_lowercase()),
                        "full_time_employees": 161_000,
                        "headquarters": { "city": "Cupertino", "state": "CA", "country": "United States" },
                        "founded": "1976",
                        "ceo": "Jane Doe",
                        "exchange": "NASDAQ",
                    })
                    .to_string(),
                ))
            })
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

impl std::fmt::Debug for MockHttpClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpClient")
            .field(
                "routes",
                &self.routes.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl HttpClient for MockHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .iter()
            .find(|(pattern, _)| request.url.contains(pattern.as_str()))
            .map(|(_, handler)| handler(&request))
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "{\"detail\":\"Not Found\"}")));
        self.requests.lock().push(request);
        Box::pin(async move { response })
    }
}

/// The `{symbol}` segment of `.../data/{symbol}/{resource}`.
fn symbol_from_url(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    let mut segments = path.rsplit('/');
    let _resource = segments.next();
    segments
        .next()
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| segment.to_owned())
        })
        .unwrap_or_default()
}

fn symbol_seed(symbol: &str) -> u64 {
    symbol.bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}
