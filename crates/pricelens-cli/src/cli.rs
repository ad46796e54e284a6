//! CLI argument definitions for pricelens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch a window and print normalized percent-change series |
//! | `summary` | Fetch a window and print per-ticker price metrics |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | `http://localhost:3000` | Backend base URL |
//! | `--token` | none | Bearer token for the backend session |
//! | `--timeout-ms` | `30000` | Per-attempt request timeout in ms |

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock window analytics over the pricelens backend.
///
/// Fetches close series for a set of tickers and a timeframe, then derives
/// chart-ready percent-change lines or a summary table from them.
#[derive(Debug, Parser)]
#[command(name = "pricelens", version, about = "Stock window analytics CLI")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Base URL of the stock data backend.
    #[arg(long, global = true, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Bearer token for the backend session. Falls back to the
    /// PRICELENS_TOKEN environment variable.
    #[arg(long, global = true, env = "PRICELENS_TOKEN")]
    pub token: Option<String>,

    /// Per-attempt request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = pricelens_core::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a window and derive percent-change chart series.
    Chart(WindowArgs),
    /// Fetch a window and compute per-ticker summary metrics.
    Summary(WindowArgs),
}

/// Shared arguments for the window-based commands.
#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Ticker symbols, comma-separated or repeated.
    #[arg(required = true, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Timeframe token: 1D, 1W, 1M, 3M, 1Y, YTD, MTD, or custom.
    #[arg(long, default_value = "1M")]
    pub timeframe: String,

    /// Window start date (YYYY-MM-DD), required for --timeframe custom.
    #[arg(long)]
    pub start: Option<String>,

    /// Window end date (YYYY-MM-DD), required for --timeframe custom.
    #[arg(long)]
    pub end: Option<String>,
}
