pub mod config;
pub mod error;
pub mod format;
pub mod labels;
pub mod merge;
pub mod metrics;
pub mod pipeline;
pub mod policy;
pub mod roles;
pub mod row;
pub mod single;
pub mod transpose;

pub use config::ChartConfig;
pub use error::ChartError;
pub use format::{
    MetricFormatter, format_big_money, format_number_fixed_decimals, format_percent,
    format_price, metric_formatter, parse_float,
};
pub use labels::ChartFormatters;
pub use merge::{IntervalSeries, IntervalWindow, merge_intervals, seconds_to_millis};
pub use metrics::{
    ArrangedMetrics, DashboardMetric, StrategyMetrics, TrvMetrics, apr_to_apy,
    arrange_strategy_metrics, arrange_trv_metrics,
};
pub use pipeline::{ChartData, ChartRequest, build_chart};
pub use policy::ConflictPolicy;
pub use roles::{ChartRoles, LineSeries, Palette, StackedSeries, assign_roles, infer_keys};
pub use row::{RowTimestamp, SeriesRow};
pub use single::{build_row, build_single_series};
pub use transpose::{select_strategies, transpose};
