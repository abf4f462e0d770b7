use serde::{Deserialize, Serialize};

use crate::{merge::IntervalWindow, policy::ConflictPolicy, roles::Palette};

/// Knobs of the chart pipeline. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
    #[serde(default)]
    pub window: IntervalWindow,
}

impl ChartConfig {
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_conflict_policy(mut self, conflict_policy: ConflictPolicy) -> Self {
        self.conflict_policy = conflict_policy;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: IntervalWindow) -> Self {
        self.window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{ "conflict_policy": "error" }"#).unwrap();
        assert_eq!(config.conflict_policy, ConflictPolicy::Error);
        assert_eq!(config.window, IntervalWindow::Unbounded);
        assert_eq!(config.palette, Palette::default());
    }
}
