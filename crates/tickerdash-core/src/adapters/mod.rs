//! Upstream adapters implementing [`crate::DashboardSource`].
//!
//! The dashboard API serves one JSON document per resource. [`RestApiAdapter`]
//! issues the requests over an [`crate::HttpClient`] and hands the bodies to
//! the per-endpoint schemas in `payload`.

mod payload;
mod rest_api;

pub use rest_api::RestApiAdapter;
