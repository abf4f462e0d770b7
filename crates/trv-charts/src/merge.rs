use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use trv_types::{ChartInterval, snapshot::leading_integer};

use crate::row::{RowTimestamp, SeriesRow};

/// How much history each interval shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IntervalWindow {
    /// Every row of the source feed.
    #[default]
    Unbounded,
    /// Only rows within the interval length of the newest row.
    Lookback,
}

impl IntervalWindow {
    fn apply(self, interval: ChartInterval, rows: &[SeriesRow]) -> Vec<SeriesRow> {
        match self {
            Self::Unbounded => rows.to_vec(),
            Self::Lookback => {
                let Some(newest) = rows.last().and_then(|row| row.timestamp.millis()) else {
                    return Vec::new();
                };
                let cutoff = newest.saturating_sub(interval.lookback_secs() * 1000);
                rows.iter()
                    .filter(|row| row.timestamp.millis().is_some_and(|ms| ms >= cutoff))
                    .cloned()
                    .collect()
            }
        }
    }
}

/// Chart rows for each supported interval, timestamps in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IntervalSeries(BTreeMap<ChartInterval, Vec<SeriesRow>>);

impl IntervalSeries {
    pub fn get(&self, interval: ChartInterval) -> &[SeriesRow] {
        self.0.get(&interval).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartInterval, &[SeriesRow])> {
        self.0.iter().map(|(interval, rows)| (*interval, rows.as_slice()))
    }
}

/// Default normaliser: seconds (as text or number) to milliseconds.
/// Rows already in milliseconds are left as they are.
pub fn seconds_to_millis(timestamp: &RowTimestamp) -> Option<i64> {
    match timestamp {
        RowTimestamp::Text(raw) => leading_integer(raw)?.checked_mul(1000),
        RowTimestamp::Seconds(secs) => secs.checked_mul(1000),
        RowTimestamp::Millis(ms) => Some(*ms),
    }
}

/// Buckets the daily and hourly feeds by chart interval.
///
/// `1D` is drawn from the hourly rows, every other interval from the daily
/// rows. Each emitted row is a copy of its source with the timestamp
/// replaced by `normalizer`'s millisecond value; rows the normaliser rejects
/// are dropped. Rows are ordered by timestamp. A missing feed yields empty
/// series for the intervals it backs.
pub fn merge_intervals<N>(
    daily: Option<&[SeriesRow]>,
    hourly: Option<&[SeriesRow]>,
    normalizer: N,
    window: IntervalWindow,
) -> IntervalSeries
where
    N: Fn(&RowTimestamp) -> Option<i64>,
{
    let daily = normalize(daily.unwrap_or_default(), &normalizer);
    let hourly = normalize(hourly.unwrap_or_default(), &normalizer);

    let series = ChartInterval::ALL
        .into_iter()
        .map(|interval| {
            let source = if interval.uses_hourly() {
                &hourly
            } else {
                &daily
            };
            (interval, window.apply(interval, source))
        })
        .collect();

    IntervalSeries(series)
}

fn normalize<N>(rows: &[SeriesRow], normalizer: &N) -> Vec<SeriesRow>
where
    N: Fn(&RowTimestamp) -> Option<i64>,
{
    let mut out: Vec<SeriesRow> = rows
        .iter()
        .filter_map(|row| match normalizer(&row.timestamp) {
            Some(ms) => Some(row.with_timestamp(RowTimestamp::Millis(ms))),
            None => {
                tracing::warn!(
                    timestamp = ?row.timestamp,
                    "Dropping chart row with unparseable timestamp"
                );
                None
            }
        })
        .collect();
    out.sort_by_key(|row| row.timestamp.millis());
    out
}
