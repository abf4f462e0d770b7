use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub rows_per_page: u32,
    /// Most rows the subgraph hands out for a single query.
    pub max_fetch_rows: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 10,
            max_fetch_rows: 1000,
        }
    }
}
