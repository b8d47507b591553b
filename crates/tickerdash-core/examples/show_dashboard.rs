//! # Show Dashboard Example
//!
//! Loads one ticker through the REST adapter and prints the rendered
//! dashboard sections.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tickerdash-core --example show_dashboard -- NVDA
//! ```
//!
//! Payloads come from the in-process demo transport, so no API server is
//! needed. Swap `MockHttpClient::demo()` for `RestApiAdapter::new(&config)`
//! to hit a running instance.

use std::sync::Arc;

use tickerdash_core::{Dashboard, DashboardConfig, MockHttpClient, RestApiAdapter, View};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let symbol = std::env::args().nth(1).unwrap_or_else(|| String::from("AAPL"));

    let config = DashboardConfig::default();
    let source = RestApiAdapter::with_http_client(&config, Arc::new(MockHttpClient::demo()));
    let dashboard = Dashboard::new(Arc::new(source)).with_history(config.history());

    println!("Fetching dashboard for {symbol}...");
    if let Some(task) = dashboard.submit_search(&symbol)? {
        task.await;
    }

    let view = match dashboard.view() {
        View::Dashboard(view) => view,
        View::Error { message } => return Err(message.into()),
        View::Loading => return Err("dashboard is still loading".into()),
    };

    println!("{}", view.header);
    println!("  {}", view.chart.sparkline);
    for stat in &view.key_stats {
        println!("  {:<14}{}", stat.label, stat.value);
    }

    println!("{}", view.news.heading);
    for card in &view.news.articles {
        println!("  {} ({}, {})", card.title, card.publisher, card.sentiment_label);
    }

    println!("Sentiment: {}", view.sentiment.label);
    Ok(())
}
