use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};
use tracing::warn;

/// Named trailing window applied to a series before charting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodWindow {
    #[default]
    #[serde(rename = "1 Month")]
    OneMonth,
    #[serde(rename = "3 Months")]
    ThreeMonths,
    #[serde(rename = "6 Months")]
    SixMonths,
    #[serde(rename = "1 Year")]
    OneYear,
    #[serde(rename = "5 Years")]
    FiveYears,
    #[serde(rename = "10 Years")]
    TenYears,
    #[serde(rename = "max")]
    Max,
}

impl PeriodWindow {
    pub const ALL: [Self; 7] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
        Self::TenYears,
        Self::Max,
    ];

    /// Resolve a label such as `"6 Months"` or `"5y"`. Unknown labels mean no filtering.
    pub fn from_label(value: &str) -> Self {
        let normalized = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "1 month" | "1m" => Self::OneMonth,
            "3 months" | "3m" => Self::ThreeMonths,
            "6 months" | "6m" => Self::SixMonths,
            "1 year" | "1y" => Self::OneYear,
            "5 years" | "5y" => Self::FiveYears,
            "10 years" | "10y" => Self::TenYears,
            "max" | "all" => Self::Max,
            other => {
                warn!(period = other, "unrecognized period, showing all data");
                Self::Max
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1 Month",
            Self::ThreeMonths => "3 Months",
            Self::SixMonths => "6 Months",
            Self::OneYear => "1 Year",
            Self::FiveYears => "5 Years",
            Self::TenYears => "10 Years",
            Self::Max => "max",
        }
    }

    /// Length of the window in calendar months, `None` when unbounded.
    pub const fn months(self) -> Option<i32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::FiveYears => Some(60),
            Self::TenYears => Some(120),
            Self::Max => None,
        }
    }

    /// `now` shifted back by the window, time of day kept. `None` keeps every row.
    pub fn cutoff(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        self.months()
            .map(|months| now.replace_date(shift_back_months(now.date(), months)))
    }

    /// Whether a row dated `date` (taken as midnight in `now`'s offset) falls inside the window.
    pub fn includes(self, date: Date, now: OffsetDateTime) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => date.midnight().assume_offset(now.offset()) >= cutoff,
            None => true,
        }
    }
}

impl Display for PeriodWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar-month subtraction; the day is clamped to the end of the target month.
fn shift_back_months(date: Date, months: i32) -> Date {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months;
    let year = index.div_euclid(12);
    // rem_euclid(12) is always in 0..12
    let month_number = (index.rem_euclid(12) + 1) as u8;
    let Ok(month) = Month::try_from(month_number) else {
        return date;
    };

    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .unwrap_or(date)
}
