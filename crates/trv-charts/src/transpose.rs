use std::collections::HashMap;

use trv_types::{SnapshotMetric, SnapshotRecord};

use crate::{
    error::ChartError,
    policy::ConflictPolicy,
    row::{RowTimestamp, SeriesRow},
};

/// Keeps the snapshots of the strategies in view, oldest first.
pub fn select_strategies<'a>(
    rows: &'a [SnapshotRecord],
    strategies: &[String],
) -> Vec<&'a SnapshotRecord> {
    let mut selected: Vec<_> = rows
        .iter()
        .filter(|row| strategies.contains(&row.strategy_name))
        .collect();
    selected.sort_by_key(|row| row.timestamp_secs());
    selected
}

/// Pivots per-strategy snapshots into one row per timeframe holding the
/// selected metric of every strategy seen in that timeframe.
///
/// Roughly:
/// ```sql
/// select timeframe,
///     max(metric) filter (where strategy = 'RamosStrategy') as "RamosStrategy",
///     max(metric) filter (where strategy = 'TlcStrategy') as "TlcStrategy"
/// from snapshots
/// group by timeframe;
/// ```
///
/// Buckets come out in order of first appearance, unsorted.
pub fn transpose<'a, I, F>(
    rows: I,
    metric: SnapshotMetric,
    formatter: F,
    policy: ConflictPolicy,
) -> Result<Vec<SeriesRow>, ChartError>
where
    I: IntoIterator<Item = &'a SnapshotRecord>,
    F: Fn(&str) -> f64,
{
    let mut buckets: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<SeriesRow> = Vec::new();
    let mut seen = 0usize;

    for row in rows {
        seen += 1;
        // the timeframe is the UTC midnight of the snapshot
        let slot = *buckets.entry(row.timeframe.as_str()).or_insert_with(|| {
            out.push(SeriesRow::new(RowTimestamp::Text(row.timeframe.clone())));
            out.len() - 1
        });
        policy.insert(
            &mut out[slot],
            &row.strategy_name,
            formatter(row.metric(metric)),
            &row.timeframe,
        )?;
    }

    tracing::debug!(
        metric = metric.as_str(),
        rows = seen,
        buckets = out.len(),
        "Transposed strategy snapshots"
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::format::metric_formatter;

    fn snapshot(timeframe: &str, strategy: &str, tmv: &str) -> SnapshotRecord {
        SnapshotRecord {
            timestamp: timeframe.to_string(),
            timeframe: timeframe.to_string(),
            strategy_name: strategy.to_string(),
            total_market_value_usd: tmv.to_string(),
            ..Default::default()
        }
    }

    fn fixture() -> Vec<SnapshotRecord> {
        vec![
            snapshot("200", "Ramos", "10.4"),
            snapshot("100", "Ramos", "5.5"),
            snapshot("100", "Tlc", "7"),
            snapshot("200", "Dsr", "1"),
            snapshot("300", "Tlc", "3"),
        ]
    }

    fn run(rows: &[SnapshotRecord], policy: ConflictPolicy) -> Result<Vec<SeriesRow>, ChartError> {
        let metric = SnapshotMetric::TotalMarketValueUsd;
        transpose(rows, metric, metric_formatter(metric), policy)
    }

    #[test]
    fn test_one_row_per_timeframe_with_observed_strategies() {
        let rows = fixture();
        let out = run(&rows, ConflictPolicy::LastWins).unwrap();

        let distinct: BTreeSet<_> = rows.iter().map(|r| r.timeframe.as_str()).collect();
        assert_eq!(out.len(), distinct.len());

        // insertion order of first occurrence
        let order: Vec<_> = out.iter().map(|r| r.timestamp.clone()).collect();
        assert_eq!(
            order,
            vec![
                RowTimestamp::Text("200".into()),
                RowTimestamp::Text("100".into()),
                RowTimestamp::Text("300".into()),
            ]
        );

        for bucket in &out {
            let RowTimestamp::Text(tf) = &bucket.timestamp else {
                panic!("transposed rows keep the timeframe string");
            };
            let expected: BTreeSet<_> = rows
                .iter()
                .filter(|r| &r.timeframe == tf)
                .map(|r| r.strategy_name.as_str())
                .collect();
            let actual: BTreeSet<_> = bucket.keys().collect();
            assert_eq!(actual, expected);
        }

        assert_eq!(out[0].get("Ramos"), Some(10.0));
        assert_eq!(out[1].get("Ramos"), Some(6.0));
        assert_eq!(out[1].get("Tlc"), Some(7.0));
    }

    #[test]
    fn test_reordering_keeps_values() {
        let rows = fixture();
        let mut reversed = rows.clone();
        reversed.reverse();

        let by_bucket = |out: Vec<SeriesRow>| {
            let mut out: Vec<_> = out
                .into_iter()
                .map(|r| (format!("{:?}", r.timestamp), r.values))
                .collect();
            out.sort_by(|a, b| a.0.cmp(&b.0));
            out
        };

        assert_eq!(
            by_bucket(run(&rows, ConflictPolicy::LastWins).unwrap()),
            by_bucket(run(&reversed, ConflictPolicy::LastWins).unwrap())
        );
    }

    #[test]
    fn test_duplicates_follow_policy() {
        let rows = vec![snapshot("100", "Ramos", "1"), snapshot("100", "Ramos", "2")];

        let last = run(&rows, ConflictPolicy::LastWins).unwrap();
        assert_eq!(last[0].get("Ramos"), Some(2.0));

        let first = run(&rows, ConflictPolicy::FirstWins).unwrap();
        assert_eq!(first[0].get("Ramos"), Some(1.0));

        assert!(matches!(
            run(&rows, ConflictPolicy::Error),
            Err(ChartError::DuplicateEntry { .. })
        ));
    }

    #[test]
    fn test_malformed_values_become_nan() {
        let rows = vec![snapshot("100", "Ramos", "n/a")];
        let out = run(&rows, ConflictPolicy::LastWins).unwrap();
        assert!(out[0].get("Ramos").unwrap().is_nan());
    }

    #[test]
    fn test_empty_input() {
        assert!(run(&[], ConflictPolicy::Error).unwrap().is_empty());
    }

    #[test]
    fn test_select_strategies_filters_and_sorts() {
        let rows = fixture();
        let selected = select_strategies(&rows, &["Ramos".to_string(), "Tlc".to_string()]);
        let picked: Vec<_> = selected
            .iter()
            .map(|r| (r.timestamp.as_str(), r.strategy_name.as_str()))
            .collect();
        assert_eq!(
            picked,
            vec![("100", "Ramos"), ("100", "Tlc"), ("200", "Ramos"), ("300", "Tlc")]
        );
    }
}
