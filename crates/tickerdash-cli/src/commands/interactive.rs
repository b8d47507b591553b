use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tickerdash_core::{Dashboard, DashboardConfig, DashboardSource, ReloadReport, Symbol};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::cli::{InteractiveArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

const QUIT_COMMAND: &str = ":q";

pub async fn run(
    args: &InteractiveArgs,
    source: Arc<dyn DashboardSource>,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let ticker = Symbol::parse(&args.ticker)?;
    let dashboard = Dashboard::with_ticker(source, ticker).with_history(config.history());

    let input = BufReader::new(tokio::io::stdin());
    session(&dashboard, input, &mut io::stdout(), format).await?;
    Ok(ExitCode::SUCCESS)
}

/// Line-driven dashboard session.
///
/// Each input line is a search submission. Reloads run on the runtime while
/// input keeps flowing; the view is reprinted whenever the latest reload
/// completes. A reload overtaken by a newer ticker finishes silently.
///
/// `:q` stops at once and cancels pending reloads. End of input waits for
/// them, so piped searches still print their dashboard.
pub async fn session<R, W>(
    dashboard: &Dashboard,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut reloads = JoinSet::new();
    reloads.spawn(dashboard.reload());
    output::write_view(out, &dashboard.view(), format)?;

    let mut lines = input.lines();
    let quit = loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break false;
                };
                let input = line.trim();
                if input == QUIT_COMMAND {
                    break true;
                }

                dashboard.set_search_text(input);
                match dashboard.submit_search(input) {
                    Ok(Some(task)) => {
                        info!(symbol = %dashboard.ticker(), "switching ticker");
                        reloads.spawn(task);
                        output::write_view(out, &dashboard.view(), format)?;
                    }
                    Ok(None) => {}
                    Err(error) => eprintln!("error: {error}"),
                }
            }
            Some(joined) = reloads.join_next(), if !reloads.is_empty() => {
                reload_finished(dashboard, joined, out, format)?;
            }
        }
    };

    if quit {
        reloads.abort_all();
        return Ok(());
    }

    debug!(pending = reloads.len(), "input closed, waiting for reloads");
    while let Some(joined) = reloads.join_next().await {
        reload_finished(dashboard, joined, out, format)?;
    }
    Ok(())
}

fn reload_finished<W: Write>(
    dashboard: &Dashboard,
    joined: Result<ReloadReport, JoinError>,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), CliError> {
    match joined {
        Ok(report) if report.current => output::write_view(out, &dashboard.view(), format)?,
        Ok(report) => debug!(
            symbol = %report.symbol,
            generation = report.generation,
            "superseded reload finished"
        ),
        Err(error) => warn!(%error, "reload task failed"),
    }
    Ok(())
}
