use serde::{Deserialize, Serialize};

use crate::data_source::HistoryRequest;
use crate::error::ValidationError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:12000/api/v1";

/// Connection and query settings of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    timeout_ms: Option<u64>,
    history: HistoryRequest,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: None,
            history: HistoryRequest::default(),
        }
    }
}

impl DashboardConfig {
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    pub const fn history(&self) -> HistoryRequest {
        self.history
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.as_str();
        let scheme_ok = url.starts_with("http://") || url.starts_with("https://");
        let has_host = url
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.trim_matches('/').is_empty());
        if !scheme_ok || !has_host {
            return Err(ValidationError::InvalidBaseUrl {
                value: self.base_url.clone(),
            });
        }
        if self.timeout_ms == Some(0) {
            return Err(ValidationError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Builder for [`DashboardConfig`]; `build` normalizes and validates.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfigBuilder {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    history: HistoryRequest,
}

impl DashboardConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn history(mut self, history: HistoryRequest) -> Self {
        self.history = history;
        self
    }

    pub fn build(self) -> Result<DashboardConfig, ValidationError> {
        let base_url = self
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let config = DashboardConfig {
            base_url,
            timeout_ms: self.timeout_ms,
            history: self.history,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interval, Period};

    #[test]
    fn defaults_point_at_local_api() {
        let config = DashboardConfig::builder().build().expect("defaults are valid");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms(), None);
        assert_eq!(config.history().period, Period::OneMonth);
        assert_eq!(config.history().interval, Interval::OneDay);
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = DashboardConfig::builder()
            .base_url(" https://quotes.internal/api/v1// ")
            .build()
            .expect("valid url");
        assert_eq!(config.base_url(), "https://quotes.internal/api/v1");
    }

    #[test]
    fn rejects_non_http_urls() {
        let error = DashboardConfig::builder()
            .base_url("ftp://quotes.internal")
            .build()
            .expect_err("ftp is not supported");
        assert!(matches!(error, ValidationError::InvalidBaseUrl { .. }));

        let error = DashboardConfig::builder()
            .base_url("http://")
            .build()
            .expect_err("host is required");
        assert!(matches!(error, ValidationError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_zero_timeout() {
        let error = DashboardConfig::builder()
            .timeout_ms(Some(0))
            .build()
            .expect_err("zero timeout");
        assert_eq!(error, ValidationError::ZeroTimeout);
    }
}
