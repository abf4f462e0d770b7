use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Intervals offered by the chart interval toggler.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ChartInterval {
    #[serde(rename = "1D")]
    #[strum(serialize = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    #[strum(serialize = "1W")]
    OneWeek,
    #[default]
    #[serde(rename = "1M")]
    #[strum(serialize = "1M")]
    OneMonth,
    #[serde(rename = "1Y")]
    #[strum(serialize = "1Y")]
    OneYear,
}

impl ChartInterval {
    pub const ALL: [Self; 4] = [Self::OneDay, Self::OneWeek, Self::OneMonth, Self::OneYear];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::OneYear => "1Y",
        }
    }

    /// Whether the interval is drawn from the hourly feed instead of the daily one.
    pub const fn uses_hourly(&self) -> bool {
        matches!(self, Self::OneDay)
    }

    pub const fn lookback_secs(&self) -> i64 {
        const DAY: i64 = 86_400;
        match self {
            Self::OneDay => DAY,
            Self::OneWeek => 7 * DAY,
            Self::OneMonth => 30 * DAY,
            Self::OneYear => 365 * DAY,
        }
    }
}
