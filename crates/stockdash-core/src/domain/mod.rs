//! # Domain Models
//!
//! Typed values flowing through a refresh pass.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | One OHLCV record for a single date |
//! | [`Series`] | Quotes for one symbol/interval, ascending by date |
//! | [`TableRow`] | Quote rounded to cents for tabular display |
//! | [`Overview`] | Company metadata shown verbatim |
//! | [`Interval`] | Daily / Weekly / Monthly granularity |
//! | [`PeriodWindow`] | Named trailing window (1 Month .. max) |
//! | [`StockChoice`] | Entry of the fixed stock catalog |
//! | [`Symbol`] | Validated ticker |
//!
//! Selection labels are lenient: an unrecognized interval resolves to
//! [`Interval::Daily`] and an unrecognized period to [`PeriodWindow::Max`].

mod catalog;
mod interval;
mod models;
mod period;
mod symbol;

pub use catalog::StockChoice;
pub use interval::Interval;
pub use models::{round_cents, Overview, Quote, Series, TableRow};
pub use period::PeriodWindow;
pub use symbol::Symbol;
