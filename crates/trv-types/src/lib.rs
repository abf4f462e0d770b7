pub mod dashboard;
pub mod interval;
pub mod metric;
pub mod snapshot;
pub mod transaction;

pub use dashboard::{ChartMode, DashboardKey, StrategyKey};
pub use interval::ChartInterval;
pub use metric::{MetricUnit, SnapshotMetric, TokenMetric};
pub use snapshot::{SnapshotRecord, TokenBreakdown};
pub use transaction::{OrderDirection, TableHeader, TransactionRecord, TxHistoryFilter};

/// Reserved row key holding the x-axis value of every chart row.
pub const TIMESTAMP_KEY: &str = "timestamp";
