use thiserror::Error;

/// Validation and contract errors exposed by `tickerdash-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol cannot be a dot path segment: '{value}'")]
    SymbolDotSegment { value: String },

    #[error("invalid interval '{value}', expected one of 1m, 5m, 15m, 30m, 1h, 1d, 1wk, 1mo")]
    InvalidInterval { value: String },
    #[error("invalid period '{value}', expected one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, ytd, max")]
    InvalidPeriod { value: String },

    #[error("timestamp is not a recognized date/time: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
