//! Terminal candlestick rendering.
//!
//! Each column is one candle. Series wider than [`MAX_COLUMNS`] are merged
//! into consecutive buckets so the whole period stays visible.

use stockdash_core::CandlestickChart;

const PLOT_HEIGHT: usize = 16;
const MAX_COLUMNS: usize = 60;
const AXIS_WIDTH: usize = 10;

const RISING_BODY: char = '█';
const FALLING_BODY: char = '▒';
const WICK: char = '│';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candle {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Candle {
    fn body_char(&self) -> char {
        if self.close >= self.open {
            RISING_BODY
        } else {
            FALLING_BODY
        }
    }
}

pub fn render_candles(chart: &CandlestickChart) -> Vec<String> {
    let mut lines = vec![chart.layout.title.clone()];

    let Some((low, high)) = chart.price_range() else {
        lines.push(String::from("(no data for the selected period)"));
        return lines;
    };

    let candles = bucket(chart, MAX_COLUMNS);
    let scale = PriceScale { low, high };

    lines.push(format!("{:>AXIS_WIDTH$}", chart.layout.yaxis_title));
    for row in 0..PLOT_HEIGHT {
        let label = if row == 0 || row == PLOT_HEIGHT / 2 || row == PLOT_HEIGHT - 1 {
            format!("{:.2}", scale.price_at(row))
        } else {
            String::new()
        };

        let cells = candles
            .iter()
            .map(|candle| cell(candle, row, &scale))
            .collect::<String>();
        lines.push(format!("{label:>AXIS_WIDTH$} ┤{cells}"));
    }

    lines.push(format!("{:>AXIS_WIDTH$} └{}", "", "─".repeat(candles.len())));
    lines.push(date_axis(chart, candles.len()));
    lines.push(format!("{:>AXIS_WIDTH$}  {}", "", chart.layout.xaxis_title));
    lines
}

struct PriceScale {
    low: f64,
    high: f64,
}

impl PriceScale {
    fn row_of(&self, price: f64) -> usize {
        let span = self.high - self.low;
        if span <= 0.0 {
            return PLOT_HEIGHT / 2;
        }
        let fraction = ((self.high - price) / span).clamp(0.0, 1.0);
        (fraction * (PLOT_HEIGHT - 1) as f64).round() as usize
    }

    fn price_at(&self, row: usize) -> f64 {
        let span = self.high - self.low;
        self.high - span * row as f64 / (PLOT_HEIGHT - 1) as f64
    }
}

fn cell(candle: &Candle, row: usize, scale: &PriceScale) -> char {
    let body_top = scale.row_of(candle.open.max(candle.close));
    let body_bottom = scale.row_of(candle.open.min(candle.close));
    let wick_top = scale.row_of(candle.high);
    let wick_bottom = scale.row_of(candle.low);

    if (body_top..=body_bottom).contains(&row) {
        candle.body_char()
    } else if (wick_top..=wick_bottom).contains(&row) {
        WICK
    } else {
        ' '
    }
}

/// Merge consecutive quotes so at most `max_columns` candles remain.
fn bucket(chart: &CandlestickChart, max_columns: usize) -> Vec<Candle> {
    let per = chart.len().div_ceil(max_columns).max(1);
    let trace = &chart.trace;

    trace
        .open
        .chunks(per)
        .zip(trace.high.chunks(per))
        .zip(trace.low.chunks(per))
        .zip(trace.close.chunks(per))
        .filter_map(|(((open, high), low), close)| {
            Some(Candle {
                open: *open.first()?,
                high: high.iter().copied().reduce(f64::max)?,
                low: low.iter().copied().reduce(f64::min)?,
                close: *close.last()?,
            })
        })
        .collect()
}

fn date_axis(chart: &CandlestickChart, columns: usize) -> String {
    let first = chart.trace.x.first().map(String::as_str).unwrap_or_default();
    let last = chart.trace.x.last().map(String::as_str).unwrap_or_default();

    if first == last {
        return format!("{:>AXIS_WIDTH$}  {first}", "");
    }
    let gap = columns.saturating_sub(first.len() + last.len()).max(1);
    format!("{:>AXIS_WIDTH$}  {first}{:gap$}{last}", "", "")
}
