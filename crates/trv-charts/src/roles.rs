use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use trv_types::{ChartMode, SnapshotMetric, TIMESTAMP_KEY};

use crate::{error::ChartError, row::SeriesRow};

/// Stack shared by every breakdown area of a single-strategy chart.
pub const BREAKDOWN_STACK_ID: &str = "breakdown";

const DEFAULT_PALETTE: [&str; 6] = [
    "#BD7B4F", "#95613F", "#D0BE75", "#FFDEC9", "#5B3E2C", "#EADBC5",
];

/// Series colors, cycled by index. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    pub fn new(colors: Vec<String>) -> Result<Self, ChartError> {
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self(colors))
    }

    pub fn color(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().map(ToString::to_string).collect())
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let colors = Vec::<String>::deserialize(deserializer)?;
        Self::new(colors).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSeries {
    pub series: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedSeries {
    pub series: String,
    pub color: String,
    pub stack_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRoles {
    pub lines: Vec<LineSeries>,
    pub stacked_items: Vec<StackedSeries>,
}

/// Every series key present in any of `rows`, sorted.
///
/// All rows are scanned since tokens enter and leave a strategy over time,
/// so no single row is guaranteed to carry the full key set.
pub fn infer_keys(rows: &[SeriesRow]) -> Vec<String> {
    rows.iter()
        .flat_map(SeriesRow::keys)
        .filter(|key| *key != TIMESTAMP_KEY)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Decides how each key is drawn.
///
/// In aggregate mode each key is a line. In single-strategy mode only the
/// selected metric is a line, on the first color, and the remaining keys are
/// stacked areas on the following colors.
pub fn assign_roles(
    keys: &[String],
    mode: ChartMode,
    selected: SnapshotMetric,
    palette: &Palette,
) -> ChartRoles {
    if keys.is_empty() {
        return ChartRoles::default();
    }

    match mode {
        ChartMode::Aggregate => ChartRoles {
            lines: keys
                .iter()
                .enumerate()
                .map(|(ix, key)| LineSeries {
                    series: key.clone(),
                    color: palette.color(ix).to_string(),
                })
                .collect(),
            stacked_items: Vec::new(),
        },
        ChartMode::SingleStrategy => ChartRoles {
            lines: vec![LineSeries {
                series: selected.as_str().to_string(),
                color: palette.color(0).to_string(),
            }],
            stacked_items: keys
                .iter()
                .filter(|key| key.as_str() != selected.as_str())
                .enumerate()
                .map(|(ix, key)| StackedSeries {
                    series: key.clone(),
                    color: palette.color(ix + 1).to_string(),
                    stack_id: BREAKDOWN_STACK_ID.to_string(),
                })
                .collect(),
        },
    }
}
