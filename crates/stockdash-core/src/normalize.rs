//! Series Normalizer: raw time series payload to a typed, period-filtered [`Series`].
//!
//! The payload maps date strings to five-field objects. Fields are read by
//! position as open, high, low, close, volume; their key names are not
//! consulted. Every row is parsed before filtering, so a bad value anywhere in
//! the payload fails the whole pass.

use serde_json::{Map, Value};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::{DataShapeError, Interval, PeriodWindow, Quote, Series};

const FIELD_COUNT: usize = 5;

pub fn normalize(
    payload: &Value,
    interval: Interval,
    period: PeriodWindow,
    now: OffsetDateTime,
) -> Result<Series, DataShapeError> {
    let key = interval.payload_key();
    let entries = payload
        .get(key)
        .ok_or_else(|| DataShapeError::missing_key(key))?
        .as_object()
        .ok_or_else(|| {
            DataShapeError::unrecognized_shape(format!("'{key}' is not an object keyed by date"))
        })?;

    let quotes = entries
        .iter()
        .map(|(raw_date, fields)| parse_quote(raw_date, fields))
        .collect::<Result<Vec<_>, _>>()?;

    let quotes = quotes
        .into_iter()
        .filter(|quote| period.includes(quote.date, now))
        .collect();

    Ok(Series::new(interval, period, quotes))
}

fn parse_quote(raw_date: &str, fields: &Value) -> Result<Quote, DataShapeError> {
    let date = parse_date(raw_date)?;
    let values = positional_fields(raw_date, fields)?;

    Ok(Quote {
        date,
        open: parse_price(raw_date, "open", values[0])?,
        high: parse_price(raw_date, "high", values[1])?,
        low: parse_price(raw_date, "low", values[2])?,
        close: parse_price(raw_date, "close", values[3])?,
        volume: parse_volume(raw_date, values[4])?,
    })
}

fn parse_date(raw: &str) -> Result<Date, DataShapeError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        DataShapeError::InvalidDate {
            value: raw.to_owned(),
        }
    })
}

fn positional_fields<'a>(raw_date: &str, fields: &'a Value) -> Result<Vec<&'a Value>, DataShapeError> {
    let object: &Map<String, Value> = fields.as_object().ok_or_else(|| {
        DataShapeError::unrecognized_shape(format!("entry for {raw_date} is not an object"))
    })?;

    if object.len() != FIELD_COUNT {
        return Err(DataShapeError::unrecognized_shape(format!(
            "entry for {raw_date} has {} fields, expected {FIELD_COUNT}",
            object.len()
        )));
    }

    Ok(object.values().collect())
}

fn parse_price(date: &str, field: &'static str, value: &Value) -> Result<f64, DataShapeError> {
    let parsed = match value {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    };

    parsed
        .filter(|price| price.is_finite())
        .ok_or_else(|| unparsable(date, field, value))
}

fn parse_volume(date: &str, value: &Value) -> Result<u64, DataShapeError> {
    let parsed = match value {
        Value::String(text) => text.trim().parse::<u64>().ok(),
        Value::Number(number) => number.as_u64(),
        _ => None,
    };

    parsed.ok_or_else(|| unparsable(date, "volume", value))
}

fn unparsable(date: &str, field: &'static str, value: &Value) -> DataShapeError {
    let value = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    DataShapeError::UnparsableNumber {
        date: date.to_owned(),
        field,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::{date, datetime};

    fn entry(open: &str, high: &str, low: &str, close: &str, volume: &str) -> Value {
        json!({
            "1. open": open,
            "2. high": high,
            "3. low": low,
            "4. close": close,
            "5. volume": volume,
        })
    }

    #[test]
    fn reads_fields_by_position_not_name() {
        let payload = json!({
            "Weekly Time Series": {
                "2024-01-05": { "a": "1", "b": "4", "c": "0.5", "d": "3", "e": "77" }
            }
        });

        let series = normalize(&payload, Interval::Weekly, PeriodWindow::Max, datetime!(2024-02-01 12:00 UTC))
            .expect("payload should normalize");
        let quote = series.ascending()[0];
        assert_eq!(
            (quote.open, quote.high, quote.low, quote.close, quote.volume),
            (1.0, 4.0, 0.5, 3.0, 77)
        );
    }

    #[test]
    fn accepts_json_numbers() {
        let payload = json!({
            "Time Series (Daily)": {
                "2024-01-02": { "1. open": 10, "2. high": 12.5, "3. low": 9, "4. close": 11, "5. volume": 1000 }
            }
        });

        let series = normalize(&payload, Interval::Daily, PeriodWindow::Max, datetime!(2024-01-03 12:00 UTC))
            .expect("numbers should parse");
        assert_eq!(series.ascending()[0].high, 12.5);
    }

    #[test]
    fn rejects_fractional_volume() {
        let payload = json!({
            "Time Series (Daily)": { "2024-01-02": entry("10", "12", "9", "11", "1000.5") }
        });

        let err = normalize(&payload, Interval::Daily, PeriodWindow::Max, datetime!(2024-01-03 12:00 UTC))
            .expect_err("fractional volume must fail");
        assert!(matches!(
            err,
            DataShapeError::UnparsableNumber { field: "volume", .. }
        ));
    }

    #[test]
    fn rejects_non_numeric_price_instead_of_zeroing() {
        let payload = json!({
            "Time Series (Daily)": { "2024-01-02": entry("10", "n/a", "9", "11", "1000") }
        });

        let err = normalize(&payload, Interval::Daily, PeriodWindow::Max, datetime!(2024-01-03 12:00 UTC))
            .expect_err("bad price must fail");
        assert_eq!(
            err,
            DataShapeError::UnparsableNumber {
                date: String::from("2024-01-02"),
                field: "high",
                value: String::from("n/a"),
            }
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        let payload = json!({
            "Time Series (Daily)": { "2024-01-02": { "1. open": "10", "2. high": "12" } }
        });

        let err = normalize(&payload, Interval::Daily, PeriodWindow::Max, datetime!(2024-01-03 12:00 UTC))
            .expect_err("short entry must fail");
        assert!(matches!(err, DataShapeError::UnrecognizedShape { .. }));
    }

    #[test]
    fn rejects_bad_dates() {
        let payload = json!({
            "Time Series (Daily)": { "01/02/2024": entry("10", "12", "9", "11", "1000") }
        });

        let err = normalize(&payload, Interval::Daily, PeriodWindow::Max, datetime!(2024-01-03 12:00 UTC))
            .expect_err("bad date must fail");
        assert!(matches!(err, DataShapeError::InvalidDate { .. }));
    }

    #[test]
    fn missing_series_key_is_reported_by_name() {
        let payload = json!({ "Meta Data": {} });

        let err = normalize(&payload, Interval::Monthly, PeriodWindow::Max, datetime!(2024-01-03 12:00 UTC))
            .expect_err("missing key must fail");
        assert_eq!(err, DataShapeError::missing_key("Monthly Time Series"));
    }

    #[test]
    fn rows_before_now_minus_window_are_dropped() {
        let payload = json!({
            "Time Series (Daily)": {
                "2024-04-14": entry("1", "1", "1", "1", "1"),
                "2024-04-15": entry("2", "2", "2", "2", "2"),
                "2024-04-16": entry("3", "3", "3", "3", "3"),
                "2024-05-15": entry("4", "4", "4", "4", "4"),
            }
        });

        let series = normalize(
            &payload,
            Interval::Daily,
            PeriodWindow::OneMonth,
            datetime!(2024-05-15 10:00 UTC),
        )
        .expect("payload should normalize");
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date!(2024 - 04 - 16)));
    }
}
