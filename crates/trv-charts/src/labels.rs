use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use trv_types::{ChartInterval, SnapshotMetric};

use crate::format::format_number_fixed_decimals;

/// Label callbacks handed to the chart for the selected interval and metric.
/// All dates are rendered in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFormatters {
    pub interval: ChartInterval,
    pub metric: SnapshotMetric,
}

impl ChartFormatters {
    pub const fn new(interval: ChartInterval, metric: SnapshotMetric) -> Self {
        Self { interval, metric }
    }

    /// X-axis tick for a millisecond timestamp.
    pub fn tick(&self, timestamp_ms: i64) -> String {
        let Some(date) = DateTime::from_timestamp_millis(timestamp_ms) else {
            return String::new();
        };
        match self.interval {
            ChartInterval::OneDay => date.format("%-I %P").to_string(),
            ChartInterval::OneWeek => date.format("%a %-d %b").to_string(),
            ChartInterval::OneMonth => month_day(&date),
            ChartInterval::OneYear => format!("{} {}", month_day(&date), date.year()),
        }
    }

    /// Tooltip header for a millisecond timestamp.
    pub fn tooltip_label(&self, timestamp_ms: i64) -> String {
        match self.interval {
            ChartInterval::OneDay => DateTime::from_timestamp_millis(timestamp_ms)
                .map(|date| format!("{}, {}", month_day(&date), date.format("%-I %P")))
                .unwrap_or_default(),
            _ => self.tick(timestamp_ms),
        }
    }

    pub fn legend(&self, series: &str) -> String {
        format!("{series} ({})", self.metric.unit().as_str())
    }

    /// Value and series name as shown in one tooltip entry.
    pub fn tooltip_value(&self, value: f64, series: &str) -> (String, String) {
        (
            format_number_fixed_decimals(value, 2).to_string(),
            self.legend(series),
        )
    }
}

/// Y-axis bounds padded by 1% on each side of the data range.
pub fn y_domain(data_min: f64, data_max: f64) -> (f64, f64) {
    (data_min - data_min * 0.01, data_max + data_max * 0.01)
}

fn month_day(date: &DateTime<Utc>) -> String {
    format!("{} {}", date.format("%b"), ordinal(date.day()))
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
