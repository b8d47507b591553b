use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CliError;

/// Quiet by default so log lines do not interleave with the dashboard.
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub ansi: bool,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .ok()
                .filter(|level| !level.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            ansi: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = self.ansi && ansi;
        self
    }

    fn filter(&self) -> Result<EnvFilter, CliError> {
        EnvFilter::try_new(&self.log_level).map_err(|error| {
            CliError::Config(format!("invalid log filter '{}': {error}", self.log_level))
        })
    }
}

/// Install the global subscriber: env filter plus a stderr fmt layer.
pub fn init_logging(config: LoggingConfig) -> Result<(), CliError> {
    let filter = config.filter()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(false),
        )
        .try_init()
        .map_err(|error| CliError::Config(format!("logging already initialized: {error}")))?;

    tracing::debug!(level = %config.log_level, "logging initialized");
    Ok(())
}
