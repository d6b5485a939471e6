//! CLI argument definitions for stockdash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Run one refresh pass and print the dashboard |
//! | `catalog` | List the selectable stocks, intervals and periods |
//! | `interactive` | Line-driven selection loop |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | env / provider | Override the provider base URL |
//! | `--timeout-ms` | env / `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! stockdash show --stock Tesla --interval Weekly --period "1 Year"
//! stockdash --format json --pretty show --stock MSFT
//! stockdash interactive
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use stockdash_core::MAX_TABLE_ROWS;

/// Stock price dashboard for the terminal
///
/// Charts daily, weekly, or monthly prices for a small catalog of stocks
/// using Alpha Vantage data. Requires ALPHAVANTAGE_API_KEY in the
/// environment or in a .env file.
#[derive(Debug, Parser)]
#[command(name = "stockdash", author, version, about = "Stock price dashboard for the terminal")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Provider base URL, overriding STOCKDASH_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds, overriding STOCKDASH_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Overview, terminal chart, and recent-trading table.
    Table,
    /// The dashboard view as a single JSON object.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and display one dashboard refresh.
    ///
    /// # Examples
    ///
    ///   stockdash show
    ///   stockdash show --stock Amazon --interval Monthly --period "5 Years"
    Show(ShowArgs),

    /// List the stock, interval, and period catalogs.
    Catalog,

    /// Change the selection line by line; each change refreshes the dashboard.
    ///
    /// Commands: stock NAME, interval I, period P, refresh, help, quit
    Interactive(SelectionArgs),
}

/// Stock, interval, and period as typed by the user.
///
/// Interval and period are resolved leniently: unknown intervals fall back
/// to Daily and unknown periods to max.
#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    /// Catalog stock by name or ticker (Apple, Microsoft, Google, Amazon, Tesla).
    #[arg(long, default_value = "Apple")]
    pub stock: String,

    /// Daily, Weekly, or Monthly.
    #[arg(long, default_value = "Daily")]
    pub interval: String,

    /// 1 Month, 3 Months, 6 Months, 1 Year, 5 Years, 10 Years, or max.
    #[arg(long, default_value = "1 Month")]
    pub period: String,
}

/// Arguments for the `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of recent rows in the trading table.
    #[arg(long, default_value_t = MAX_TABLE_ROWS)]
    pub rows: usize,
}
