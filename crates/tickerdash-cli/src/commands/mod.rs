mod interactive;
mod show;

use std::process::ExitCode;
use std::sync::Arc;

use tickerdash_core::{
    DashboardConfig, DashboardSource, HistoryRequest, Interval, MockHttpClient, Period,
    RestApiAdapter,
};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = dashboard_config(cli)?;
    let source = build_source(&config, cli.mock);

    match &cli.command {
        Command::Show(args) => show::run(args, source, &config, cli.format).await,
        Command::Interactive(args) => interactive::run(args, source, &config, cli.format).await,
    }
}

fn dashboard_config(cli: &Cli) -> Result<DashboardConfig, CliError> {
    let history = HistoryRequest::new(
        cli.period.parse::<Period>()?,
        cli.interval.parse::<Interval>()?,
    );
    let config = DashboardConfig::builder()
        .base_url(&cli.base_url)
        .timeout_ms(cli.timeout_ms)
        .history(history)
        .build()?;
    debug!(
        base_url = config.base_url(),
        timeout_ms = ?config.timeout_ms(),
        "dashboard configured"
    );
    Ok(config)
}

fn build_source(config: &DashboardConfig, mock: bool) -> Arc<dyn DashboardSource> {
    let adapter = if mock {
        RestApiAdapter::with_http_client(config, Arc::new(MockHttpClient::demo()))
    } else {
        RestApiAdapter::new(config)
    };
    Arc::new(adapter)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tickerdash_core::ValidationError;

    use super::*;

    #[test]
    fn history_flags_are_validated() {
        let cli = Cli::try_parse_from(["tickerdash", "--period", "2wk", "show"]).expect("parses");
        let error = dashboard_config(&cli).expect_err("2wk is not a period");
        assert!(matches!(
            error,
            CliError::Validation(ValidationError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn base_url_flag_is_normalized() {
        let cli = Cli::try_parse_from([
            "tickerdash",
            "--base-url",
            "https://dash.example/api/v1/",
            "--interval",
            "1wk",
            "show",
        ])
        .expect("parses");
        let config = dashboard_config(&cli).expect("valid config");
        assert_eq!(config.base_url(), "https://dash.example/api/v1");
        assert_eq!(config.history().interval, Interval::OneWeek);
    }
}
