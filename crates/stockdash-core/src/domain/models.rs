use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;

use crate::{DataShapeError, Interval, PeriodWindow};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// One trading-period record. Provider values are passed through unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Display form of a quote with prices rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&Quote> for TableRow {
    fn from(quote: &Quote) -> Self {
        Self {
            date: quote.date,
            open: round_cents(quote.open),
            high: round_cents(quote.high),
            low: round_cents(quote.low),
            close: round_cents(quote.close),
            volume: quote.volume,
        }
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Quotes for one symbol and interval, kept ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub interval: Interval,
    pub period: PeriodWindow,
    quotes: Vec<Quote>,
}

impl Series {
    /// Sorts `quotes` ascending by date.
    pub fn new(interval: Interval, period: PeriodWindow, mut quotes: Vec<Quote>) -> Self {
        quotes.sort_by_key(|quote| quote.date);
        Self {
            interval,
            period,
            quotes,
        }
    }

    pub fn ascending(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn descending(&self) -> Vec<Quote> {
        self.quotes.iter().rev().copied().collect()
    }

    /// Newest `limit` rows, most recent first, rounded for display.
    pub fn table_rows(&self, limit: usize) -> Vec<TableRow> {
        self.quotes
            .iter()
            .rev()
            .take(limit)
            .map(TableRow::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn first_date(&self) -> Option<Date> {
        self.quotes.first().map(|quote| quote.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.quotes.last().map(|quote| quote.date)
    }
}

/// Company metadata from the overview endpoint, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub symbol: String,
    pub name: Option<String>,
    pub asset_type: Option<String>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub official_site: Option<String>,
    pub description: Option<String>,
}

impl Overview {
    /// Only `Symbol` is required; the remaining fields are optional text.
    pub fn from_payload(payload: &Value) -> Result<Self, DataShapeError> {
        let object = payload.as_object().ok_or_else(|| {
            DataShapeError::unrecognized_shape("overview payload is not a JSON object")
        })?;

        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        let symbol = text("Symbol").ok_or_else(|| DataShapeError::missing_key("Symbol"))?;

        Ok(Self {
            symbol,
            name: text("Name"),
            asset_type: text("AssetType"),
            exchange: text("Exchange"),
            currency: text("Currency"),
            country: text("Country"),
            sector: text("Sector"),
            official_site: text("OfficialSite"),
            description: text("Description"),
        })
    }
}
