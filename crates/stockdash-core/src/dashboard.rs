//! One refresh pass: fetch, interpret the overview, normalize, build the views.
//!
//! Session state is an explicit [`SessionContext`] value. The caller passes the
//! current context in and keeps the one returned in [`RefreshOutcome`].

use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::info;

use crate::chart::CandlestickChart;
use crate::fetcher::AlphaVantageFetcher;
use crate::normalize::normalize;
use crate::{
    DashboardError, Interval, Overview, PeriodWindow, StockChoice, TableRow, ValidationError,
};

pub const MAX_TABLE_ROWS: usize = 10;

/// What the user picked in the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub stock: StockChoice,
    pub interval: Interval,
    pub period: PeriodWindow,
}

/// Per-session state threaded through refresh passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub last_refresh: Option<OffsetDateTime>,
}

impl SessionContext {
    pub fn last_refresh_label(&self) -> String {
        let layout = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        match self.last_refresh.and_then(|at| at.format(layout).ok()) {
            Some(formatted) => format!("Last Refresh: {formatted}"),
            None => String::from("Last Refresh: Never"),
        }
    }
}

/// The recent-trading grid shown under the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTable {
    pub heading: String,
    pub rows: Vec<TableRow>,
}

/// Everything the shell renders after a successful pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stock_name: String,
    pub overview: Overview,
    pub chart: CandlestickChart,
    pub table: RecentTable,
    pub last_refresh: String,
}

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub session: SessionContext,
    pub result: Result<DashboardView, DashboardError>,
}

/// Runs refresh passes against one fetcher.
#[derive(Clone)]
pub struct Dashboard {
    fetcher: AlphaVantageFetcher,
    table_rows: usize,
}

impl Dashboard {
    pub fn new(fetcher: AlphaVantageFetcher) -> Self {
        Self {
            fetcher,
            table_rows: MAX_TABLE_ROWS,
        }
    }

    pub fn with_table_rows(mut self, rows: usize) -> Result<Self, ValidationError> {
        if rows == 0 || rows > MAX_TABLE_ROWS {
            return Err(ValidationError::InvalidRowLimit {
                value: rows,
                max: MAX_TABLE_ROWS,
            });
        }
        self.table_rows = rows;
        Ok(self)
    }

    /// `last_refresh` advances to `now` only when the fetch itself succeeded.
    pub async fn refresh(
        &self,
        selection: &Selection,
        session: SessionContext,
        now: OffsetDateTime,
    ) -> RefreshOutcome {
        let symbol = match selection.stock.symbol() {
            Ok(symbol) => symbol,
            Err(error) => {
                return RefreshOutcome {
                    session,
                    result: Err(error.into()),
                }
            }
        };
        let raw = match self.fetcher.fetch(&symbol, selection.interval).await {
            Ok(raw) => raw,
            Err(error) => {
                return RefreshOutcome {
                    session,
                    result: Err(error),
                }
            }
        };

        let session = SessionContext {
            last_refresh: Some(now),
        };
        let result = self.build_view(selection, &session, &raw.market, &raw.overview, now);
        if let Ok(view) = &result {
            info!(
                symbol = %view.overview.symbol,
                interval = %selection.interval,
                period = %selection.period,
                rows = view.chart.len(),
                "refresh complete"
            );
        }

        RefreshOutcome { session, result }
    }

    fn build_view(
        &self,
        selection: &Selection,
        session: &SessionContext,
        market: &serde_json::Value,
        overview: &serde_json::Value,
        now: OffsetDateTime,
    ) -> Result<DashboardView, DashboardError> {
        let overview = Overview::from_payload(overview)?;
        let series = normalize(market, selection.interval, selection.period, now)?;

        let chart = CandlestickChart::from_series(
            &series,
            &overview.symbol,
            selection.interval,
            selection.period,
        );
        let table = RecentTable {
            heading: format!(
                "Recent {} Trading Data - {}",
                selection.interval, selection.period
            ),
            rows: series.table_rows(self.table_rows),
        };

        Ok(DashboardView {
            stock_name: selection.stock.name.to_owned(),
            overview,
            chart,
            table,
            last_refresh: session.last_refresh_label(),
        })
    }
}
