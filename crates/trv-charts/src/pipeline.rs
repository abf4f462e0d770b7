use serde::{Deserialize, Serialize};
use trv_types::{ChartInterval, ChartMode, DashboardKey, SnapshotMetric, SnapshotRecord};

use crate::{
    config::ChartConfig,
    error::ChartError,
    format::metric_formatter,
    labels::{ChartFormatters, y_domain},
    merge::{IntervalSeries, merge_intervals, seconds_to_millis},
    policy::ConflictPolicy,
    roles::{ChartRoles, assign_roles, infer_keys},
    row::SeriesRow,
    single::build_single_series,
    transpose::{select_strategies, transpose},
};

/// What the dashboard currently asks to plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub strategies: Vec<String>,
    #[serde(default)]
    pub metric: SnapshotMetric,
    #[serde(default)]
    pub interval: ChartInterval,
    #[serde(default)]
    pub mode: ChartMode,
}

impl ChartRequest {
    pub fn for_dashboard(
        dashboard: DashboardKey,
        metric: SnapshotMetric,
        interval: ChartInterval,
    ) -> Self {
        Self {
            strategies: dashboard.strategy_names(),
            metric,
            interval,
            mode: dashboard.chart_mode(),
        }
    }
}

/// Everything the chart component needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub interval: ChartInterval,
    pub metric: SnapshotMetric,
    pub mode: ChartMode,
    pub series: IntervalSeries,
    /// Series keys of the selected interval
    pub keys: Vec<String>,
    #[serde(flatten)]
    pub roles: ChartRoles,
}

impl ChartData {
    /// Rows of the selected interval.
    pub fn rows(&self) -> &[SeriesRow] {
        self.series.get(self.interval)
    }

    /// Nothing to plot yet: the chart shows its loader instead.
    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub const fn formatters(&self) -> ChartFormatters {
        ChartFormatters::new(self.interval, self.metric)
    }

    /// Padded y-axis bounds over the finite values of the selected interval.
    pub fn y_domain(&self) -> Option<(f64, f64)> {
        let (min, max) = self
            .rows()
            .iter()
            .flat_map(|row| row.values.values().copied())
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })?;
        Some(y_domain(min, max))
    }
}

/// Runs the whole chart pipeline: strategy selection, reshaping, interval
/// bucketing, key inference and role assignment.
///
/// A missing feed (still loading or failed upstream) is treated as empty.
pub fn build_chart(
    daily: Option<&[SnapshotRecord]>,
    hourly: Option<&[SnapshotRecord]>,
    request: &ChartRequest,
    config: &ChartConfig,
) -> Result<ChartData, ChartError> {
    let daily_rows = daily
        .map(|rows| reshape(rows, request, config.conflict_policy))
        .transpose()?;
    let hourly_rows = hourly
        .map(|rows| reshape(rows, request, config.conflict_policy))
        .transpose()?;

    let series = merge_intervals(
        daily_rows.as_deref(),
        hourly_rows.as_deref(),
        seconds_to_millis,
        config.window,
    );

    let keys = infer_keys(series.get(request.interval));
    let roles = assign_roles(&keys, request.mode, request.metric, &config.palette);

    tracing::debug!(
        metric = request.metric.as_str(),
        interval = request.interval.as_str(),
        strategies = request.strategies.len(),
        rows = series.get(request.interval).len(),
        keys = keys.len(),
        "Built chart data"
    );

    Ok(ChartData {
        interval: request.interval,
        metric: request.metric,
        mode: request.mode,
        series,
        keys,
        roles,
    })
}

fn reshape(
    rows: &[SnapshotRecord],
    request: &ChartRequest,
    policy: ConflictPolicy,
) -> Result<Vec<SeriesRow>, ChartError> {
    let selected = select_strategies(rows, &request.strategies);

    // a single strategy is charted with its own breakdown, several are
    // pivoted to one column per strategy
    if request.strategies.len() == 1 {
        build_single_series(selected, request.metric, policy)
    } else {
        transpose(
            selected,
            request.metric,
            metric_formatter(request.metric),
            policy,
        )
    }
}

#[cfg(test)]
mod tests {
    use trv_types::{StrategyKey, TokenBreakdown};

    use super::*;
    use crate::row::RowTimestamp;

    fn snapshot(ts: i64, strategy: &str, tmv: &str, tokens: &[(&str, &str)]) -> SnapshotRecord {
        SnapshotRecord {
            timestamp: ts.to_string(),
            timeframe: (ts - ts % 86_400).to_string(),
            strategy_name: strategy.to_string(),
            total_market_value_usd: tmv.to_string(),
            strategy_tokens: tokens
                .iter()
                .map(|(symbol, value)| TokenBreakdown {
                    symbol: (*symbol).to_string(),
                    market_value_usd: (*value).to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    const DAY: i64 = 86_400;

    fn daily() -> Vec<SnapshotRecord> {
        vec![
            snapshot(
                2 * DAY,
                "RamosStrategy",
                "20",
                &[("DAI", "15"), ("TEMPLE", "5")],
            ),
            snapshot(DAY, "RamosStrategy", "10", &[("DAI", "10")]),
            snapshot(DAY, "TlcStrategy", "3", &[]),
            snapshot(2 * DAY, "TlcStrategy", "4", &[]),
            snapshot(2 * DAY, "FohmoStrategy", "99", &[]),
        ]
    }

    #[test]
    fn test_trv_dashboard_pivots_strategies() {
        let daily = daily();
        let request = ChartRequest {
            strategies: vec!["RamosStrategy".into(), "TlcStrategy".into()],
            metric: SnapshotMetric::TotalMarketValueUsd,
            interval: ChartInterval::OneMonth,
            mode: ChartMode::Aggregate,
        };
        let chart = build_chart(
            Some(daily.as_slice()),
            None,
            &request,
            &ChartConfig::default(),
        )
        .unwrap();

        let rows = chart.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, RowTimestamp::Millis(DAY * 1000));
        assert_eq!(rows[0].get("RamosStrategy"), Some(10.0));
        assert_eq!(rows[1].get("TlcStrategy"), Some(4.0));
        assert_eq!(chart.keys, vec!["RamosStrategy", "TlcStrategy"]);
        assert_eq!(chart.roles.lines.len(), 2);
        assert!(chart.roles.stacked_items.is_empty());
        assert!(chart.series.get(ChartInterval::OneDay).is_empty());
    }

    #[test]
    fn test_strategy_dashboard_stacks_token_breakdown() {
        let daily = daily();
        let request = ChartRequest::for_dashboard(
            DashboardKey::Strategy(StrategyKey::Ramos),
            SnapshotMetric::TotalMarketValueUsd,
            ChartInterval::OneWeek,
        );
        let chart = build_chart(
            Some(daily.as_slice()),
            Some(daily.as_slice()),
            &request,
            &ChartConfig::default(),
        )
        .unwrap();

        // TEMPLE only shows up in the later snapshot
        assert_eq!(chart.keys, vec!["DAI", "TEMPLE", "totalMarketValueUSD"]);
        assert_eq!(chart.roles.lines[0].series, "totalMarketValueUSD");
        let stacked: Vec<_> = chart
            .roles
            .stacked_items
            .iter()
            .map(|s| s.series.as_str())
            .collect();
        assert_eq!(stacked, vec!["DAI", "TEMPLE"]);
        assert_eq!(chart.series.get(ChartInterval::OneDay).len(), 2);
    }

    #[test]
    fn test_missing_data_is_empty_not_an_error() {
        let request = ChartRequest::for_dashboard(
            DashboardKey::TreasuryReservesVault,
            SnapshotMetric::DebtUsd,
            ChartInterval::OneYear,
        );
        let chart = build_chart(None, None, &request, &ChartConfig::default()).unwrap();
        assert!(chart.is_empty());
        assert!(chart.keys.is_empty());
        assert!(chart.roles.lines.is_empty());
        assert_eq!(chart.y_domain(), None);
    }

    #[test]
    fn test_conflict_policy_is_applied() {
        let mut rows = daily();
        rows.push(snapshot(DAY, "TlcStrategy", "8", &[]));
        let request = ChartRequest {
            strategies: vec!["RamosStrategy".into(), "TlcStrategy".into()],
            metric: SnapshotMetric::TotalMarketValueUsd,
            interval: ChartInterval::OneMonth,
            mode: ChartMode::Aggregate,
        };

        let strict = ChartConfig::default().with_conflict_policy(ConflictPolicy::Error);
        assert!(build_chart(Some(rows.as_slice()), None, &request, &strict).is_err());

        let lenient = build_chart(
            Some(rows.as_slice()),
            None,
            &request,
            &ChartConfig::default(),
        )
        .unwrap();
        assert_eq!(lenient.rows()[0].get("TlcStrategy"), Some(8.0));
    }

    #[test]
    fn test_y_domain_and_serialized_shape() {
        let daily = daily();
        let request = ChartRequest {
            strategies: vec!["RamosStrategy".into(), "TlcStrategy".into()],
            metric: SnapshotMetric::TotalMarketValueUsd,
            interval: ChartInterval::OneMonth,
            mode: ChartMode::Aggregate,
        };
        let chart = build_chart(
            Some(daily.as_slice()),
            None,
            &request,
            &ChartConfig::default(),
        )
        .unwrap();
        assert_eq!(chart.y_domain(), Some(y_domain(3.0, 20.0)));

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["interval"], "1M");
        assert_eq!(json["metric"], "totalMarketValueUSD");
        assert_eq!(json["series"]["1M"][1]["RamosStrategy"], 20.0);
        assert!(json["lines"].is_array());
        assert!(json["stackedItems"].as_array().unwrap().is_empty());
    }
}
