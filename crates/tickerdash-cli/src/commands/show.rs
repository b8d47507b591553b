use std::process::ExitCode;
use std::sync::Arc;

use tickerdash_core::{Dashboard, DashboardConfig, DashboardSource};
use tracing::debug;

use crate::cli::{OutputFormat, ShowArgs};
use crate::error::CliError;
use crate::output;

/// Exit code when the rendered view is the error banner.
const EXIT_VIEW_ERROR: u8 = 3;

pub async fn run(
    args: &ShowArgs,
    source: Arc<dyn DashboardSource>,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let dashboard = Dashboard::new(source).with_history(config.history());

    let report = match dashboard.submit_search(&args.symbol)? {
        Some(task) => task.await,
        None => dashboard.reload().await,
    };
    debug!(symbol = %report.symbol, generation = report.generation, "dashboard loaded");

    let view = dashboard.view();
    output::render(&view, format)?;

    if view.is_error() {
        return Ok(ExitCode::from(EXIT_VIEW_ERROR));
    }
    Ok(ExitCode::SUCCESS)
}
