use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Granularity of a time series as offered by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Resolve a user-facing label. Anything unrecognized resolves to `Daily`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            other => {
                warn!(interval = other, "unrecognized interval, using Daily");
                Self::Daily
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Value of the `function` query parameter for this series.
    pub const fn function_name(self) -> &'static str {
        match self {
            Self::Daily => "TIME_SERIES_DAILY",
            Self::Weekly => "TIME_SERIES_WEEKLY",
            Self::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Top-level key holding the date map in the time series payload.
    pub const fn payload_key(self) -> &'static str {
        match self {
            Self::Daily => "Time Series (Daily)",
            Self::Weekly => "Weekly Time Series",
            Self::Monthly => "Monthly Time Series",
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
