use std::collections::BTreeMap;

use serde::Serialize;
use trv_types::TIMESTAMP_KEY;

/// X-axis value of a chart row, before or after normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowTimestamp {
    /// Seconds since epoch as delivered by the subgraph
    Text(String),
    Seconds(i64),
    Millis(i64),
}

impl RowTimestamp {
    pub const fn millis(&self) -> Option<i64> {
        match self {
            Self::Millis(ms) => Some(*ms),
            Self::Text(_) | Self::Seconds(_) => None,
        }
    }
}

/// One chart row: the timestamp plus an open set of named values.
///
/// The key set differs between rows (strategies and tokens come and go), so
/// values live in a map and the row serialises flat as
/// `{"timestamp": .., "<key>": <value>, ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub timestamp: RowTimestamp,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl SeriesRow {
    pub const fn new(timestamp: RowTimestamp) -> Self {
        Self {
            timestamp,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|key| *key != TIMESTAMP_KEY)
    }

    /// Copy of this row with its timestamp replaced, values untouched.
    #[must_use]
    pub fn with_timestamp(&self, timestamp: RowTimestamp) -> Self {
        Self {
            timestamp,
            values: self.values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_flat() {
        let mut row = SeriesRow::new(RowTimestamp::Millis(1_000));
        row.values.insert("DAI".to_string(), 12.0);
        row.values.insert("gap".to_string(), f64::NAN);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "timestamp": 1000, "DAI": 12.0, "gap": null })
        );

        let text = SeriesRow::new(RowTimestamp::Text("1700000000".to_string()));
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            serde_json::json!({ "timestamp": "1700000000" })
        );
    }
}
