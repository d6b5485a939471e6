//! # Stockdash Core
//!
//! Quote fetching and time-series shaping for the stockdash dashboard.
//!
//! ## Overview
//!
//! A refresh pass takes a [`Selection`] (stock, interval, period) and produces a
//! [`DashboardView`]: company overview, candlestick chart model, and the recent
//! trading table. The pieces are usable on their own:
//!
//! - **Data Fetcher** ([`AlphaVantageFetcher`]) issues the time series and
//!   overview requests and classifies failures
//! - **Series Normalizer** ([`normalize()`]) turns the nested payload into a
//!   sorted, typed, period-filtered [`Series`]
//! - **Chart model** ([`CandlestickChart`]) describes the figure for any renderer
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | Candlestick figure model |
//! | [`config`] | Startup configuration and API key handling |
//! | [`dashboard`] | Refresh pass and session context |
//! | [`domain`] | Quote, Series, Overview, Interval, PeriodWindow, catalog |
//! | [`error`] | Error taxonomy |
//! | [`fetcher`] | Provider requests |
//! | [`http_client`] | Injectable HTTP transport |
//! | [`normalize`] | Series Normalizer |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockdash_core::{Dashboard, AlphaVantageFetcher, DashboardConfig, Selection, SessionContext};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::from_env()?;
//!     let dashboard = Dashboard::new(AlphaVantageFetcher::from_config(&config)?);
//!
//!     let outcome = dashboard
//!         .refresh(&Selection::default(), SessionContext::default(), time::OffsetDateTime::now_utc())
//!         .await;
//!     match outcome.result {
//!         Ok(view) => println!("{} rows charted", view.chart.len()),
//!         Err(error) => eprintln!("{}", error.user_message()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Refresh failures are [`DashboardError`]s and never panic:
//!
//! ```rust
//! use stockdash_core::{DashboardError, DataShapeError};
//!
//! let error = DashboardError::from(DataShapeError::missing_key("Symbol"));
//! assert_eq!(error.user_message(), "Unexpected error: missing expected key 'Symbol'");
//! ```
//!
//! ## Security
//!
//! - The API key is read from the environment and redacted from logs and errors
//! - TLS certificate verification is always enabled

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod normalize;

pub use chart::{CandlestickChart, CandlestickTrace, ChartLayout};
pub use config::{ApiKey, DashboardConfig};
pub use dashboard::{
    Dashboard, DashboardView, RecentTable, RefreshOutcome, Selection, SessionContext,
    MAX_TABLE_ROWS,
};
pub use domain::{
    round_cents, Interval, Overview, PeriodWindow, Quote, Series, StockChoice, Symbol, TableRow,
};
pub use error::{ConfigError, DashboardError, DataShapeError, TransportError, ValidationError};
pub use fetcher::{AlphaVantageFetcher, RawQuoteData};
pub use http_client::{
    HttpClient, HttpClientConfig, HttpError, HttpErrorKind, HttpRequest, HttpResponse,
    ReqwestHttpClient, StaticHttpClient,
};
pub use normalize::normalize;
