use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use trv_types::TIMESTAMP_KEY;

use crate::{error::ChartError, row::SeriesRow};

/// What to do when a row receives the same key twice, e.g. two snapshots of
/// one strategy in the same timeframe or two tokens sharing a symbol.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConflictPolicy {
    /// The value seen last replaces the earlier one, silently.
    #[default]
    LastWins,
    /// The first value is kept and later ones are ignored.
    FirstWins,
    /// A repeated key fails the whole reshaping step.
    Error,
}

impl ConflictPolicy {
    /// Writes `key = value` into `row`, resolving a collision per policy.
    /// `bucket` identifies the row in error messages.
    pub fn insert(
        self,
        row: &mut SeriesRow,
        key: &str,
        value: f64,
        bucket: &str,
    ) -> Result<(), ChartError> {
        // the timestamp is a fixed field, never a series
        if key == TIMESTAMP_KEY {
            tracing::debug!(bucket, "Ignoring value keyed as the reserved timestamp field");
            return Ok(());
        }

        match row.values.entry(key.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => match self {
                Self::LastWins => {
                    entry.insert(value);
                }
                Self::FirstWins => {}
                Self::Error => {
                    return Err(ChartError::DuplicateEntry {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    });
                }
            },
        }
        Ok(())
    }
}
