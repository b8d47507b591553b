//! CLI argument definitions for tickerdash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Load one ticker and print the dashboard once |
//! | `interactive` | Read tickers from stdin and reprint the dashboard on every load |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `http://localhost:12000/api/v1` | API root (`TICKERDASH_API_URL`) |
//! | `--timeout-ms` | none | Per-request timeout (`TICKERDASH_TIMEOUT_MS`) |
//! | `--period` | `1mo` | History lookback |
//! | `--interval` | `1d` | History sampling interval |
//! | `--format` | `table` | Output format (table, json) |
//! | `--no-color` | `false` | Plain text output |
//! | `--mock` | `false` | Serve demo payloads without network access |
//!
//! # Examples
//!
//! ```bash
//! tickerdash show MSFT
//! tickerdash show ^GSPC --period 6mo --format json
//! tickerdash --mock interactive --ticker NVDA
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickerdash_core::{DEFAULT_BASE_URL, DEFAULT_SYMBOL};

/// Terminal stock dashboard: price, profile, history, news and sentiment
/// for one ticker.
#[derive(Debug, Parser)]
#[command(name = "tickerdash", author, version, about = "Terminal stock dashboard")]
pub struct Cli {
    /// Root of the dashboard API.
    #[arg(
        long,
        global = true,
        env = "TICKERDASH_API_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Per-request timeout in milliseconds. Unset waits indefinitely.
    #[arg(long, global = true, env = "TICKERDASH_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// History lookback (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, ytd, max).
    #[arg(long, global = true, default_value = "1mo")]
    pub period: String,

    /// History sampling interval (1m, 5m, 15m, 30m, 1h, 1d, 1wk, 1mo).
    #[arg(long, global = true, default_value = "1d")]
    pub interval: String,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Disable ANSI colors in table output.
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Answer from built-in demo payloads instead of the network.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable dashboard.
    Table,
    /// The view tree as pretty JSON.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load one ticker and print the dashboard.
    ///
    /// Exits with code 3 when any resource failed to load.
    ///
    ///   tickerdash show
    ///   tickerdash show brk.b
    Show(ShowArgs),

    /// Read ticker symbols from stdin, one per line; `:q` quits.
    Interactive(InteractiveArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker symbol, case-insensitive.
    #[arg(default_value = DEFAULT_SYMBOL)]
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Ticker loaded on start.
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    pub ticker: String,
}
