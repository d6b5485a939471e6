use serde::Serialize;

use crate::{Interval, PeriodWindow, Series};

pub const CHART_HEIGHT: u32 = 600;

/// Candlestick figure description, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickChart {
    pub trace: CandlestickTrace,
    pub layout: ChartLayout,
}

/// Column-oriented OHLC values, unrounded, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub x: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub xaxis_title: String,
    pub yaxis_title: String,
    pub height: u32,
    pub showlegend: bool,
    pub xaxis_rangeslider_visible: bool,
}

impl CandlestickChart {
    pub fn from_series(
        series: &Series,
        symbol: &str,
        interval: Interval,
        period: PeriodWindow,
    ) -> Self {
        let quotes = series.ascending();
        let trace = CandlestickTrace {
            name: symbol.to_owned(),
            x: quotes.iter().map(|quote| quote.date.to_string()).collect(),
            open: quotes.iter().map(|quote| quote.open).collect(),
            high: quotes.iter().map(|quote| quote.high).collect(),
            low: quotes.iter().map(|quote| quote.low).collect(),
            close: quotes.iter().map(|quote| quote.close).collect(),
        };

        Self {
            trace,
            layout: ChartLayout {
                title: chart_title(symbol, interval, period),
                xaxis_title: String::from("Date"),
                yaxis_title: String::from("Price ($)"),
                height: CHART_HEIGHT,
                showlegend: false,
                xaxis_rangeslider_visible: false,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.trace.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.x.is_empty()
    }

    /// Lowest low and highest high across the trace.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let low = self.trace.low.iter().copied().reduce(f64::min)?;
        let high = self.trace.high.iter().copied().reduce(f64::max)?;
        Some((low, high))
    }
}

pub fn chart_title(symbol: &str, interval: Interval, period: PeriodWindow) -> String {
    format!("{symbol} Stock Price - {interval} - {period}")
}
