use trv_types::{SnapshotMetric, SnapshotRecord};

use crate::{
    error::ChartError,
    format::{metric_formatter, parse_rounded},
    policy::ConflictPolicy,
    row::{RowTimestamp, SeriesRow},
};

/// Chart row for a dashboard showing a single strategy.
///
/// Next to the selected metric the row carries either the fixed companion
/// metrics (debt and credit for net debt) or, when the metric decomposes per
/// asset, one value per token symbol.
pub fn build_row(
    snapshot: &SnapshotRecord,
    selected: SnapshotMetric,
    policy: ConflictPolicy,
) -> Result<SeriesRow, ChartError> {
    let bucket = snapshot.timestamp.as_str();
    let mut row = SeriesRow::new(RowTimestamp::Text(snapshot.timestamp.clone()));

    let format = metric_formatter(selected);
    policy.insert(
        &mut row,
        selected.as_str(),
        format(snapshot.metric(selected)),
        bucket,
    )?;

    let companions = selected.companions();
    if !companions.is_empty() {
        for companion in companions {
            policy.insert(
                &mut row,
                companion.as_str(),
                parse_rounded(snapshot.metric(*companion)),
                bucket,
            )?;
        }
        return Ok(row);
    }

    if let Some(field) = selected.token_breakdown() {
        for token in &snapshot.strategy_tokens {
            policy.insert(
                &mut row,
                &token.symbol,
                parse_rounded(token.value(field)),
                bucket,
            )?;
        }
    }

    Ok(row)
}

pub fn build_single_series<'a, I>(
    rows: I,
    selected: SnapshotMetric,
    policy: ConflictPolicy,
) -> Result<Vec<SeriesRow>, ChartError>
where
    I: IntoIterator<Item = &'a SnapshotRecord>,
{
    rows.into_iter()
        .map(|snapshot| build_row(snapshot, selected, policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use trv_types::TokenBreakdown;

    use super::*;

    fn token(symbol: &str, debt: &str, market_value: &str) -> TokenBreakdown {
        TokenBreakdown {
            symbol: symbol.to_string(),
            debt_usd: debt.to_string(),
            market_value_usd: market_value.to_string(),
            ..Default::default()
        }
    }

    fn snapshot() -> SnapshotRecord {
        SnapshotRecord {
            timestamp: "1700000000".to_string(),
            timeframe: "1699920000".to_string(),
            strategy_name: "RamosStrategy".to_string(),
            total_market_value_usd: "1500.5".to_string(),
            debt_usd: "900.2".to_string(),
            net_debt_usd: "400.7".to_string(),
            credit_usd: "500.1".to_string(),
            principal_usd: "800".to_string(),
            benchmarked_equity_usd: "42".to_string(),
            strategy_tokens: vec![token("DAI", "600", "1000"), token("TEMPLE", "300.4", "500.5")],
            ..Default::default()
        }
    }

    fn keys(row: &SeriesRow) -> BTreeSet<&str> {
        row.keys().collect()
    }

    #[test]
    fn test_net_debt_adds_fixed_companions_only() {
        let row = build_row(&snapshot(), SnapshotMetric::NetDebtUsd, ConflictPolicy::LastWins)
            .unwrap();
        assert_eq!(
            keys(&row),
            BTreeSet::from(["netDebtUSD", "debtUSD", "creditUSD"])
        );
        assert_eq!(row.timestamp, RowTimestamp::Text("1700000000".to_string()));
        assert_eq!(row.get("netDebtUSD"), Some(401.0));
        assert_eq!(row.get("debtUSD"), Some(900.0));
        assert_eq!(row.get("creditUSD"), Some(500.0));
    }

    #[test]
    fn test_breakdown_adds_one_key_per_token() {
        let row = build_row(
            &snapshot(),
            SnapshotMetric::TotalMarketValueUsd,
            ConflictPolicy::LastWins,
        )
        .unwrap();
        assert_eq!(
            keys(&row),
            BTreeSet::from(["totalMarketValueUSD", "DAI", "TEMPLE"])
        );
        assert_eq!(row.get("totalMarketValueUSD"), Some(1501.0));
        assert_eq!(row.get("TEMPLE"), Some(501.0));

        let debt = build_row(&snapshot(), SnapshotMetric::DebtUsd, ConflictPolicy::LastWins)
            .unwrap();
        assert_eq!(debt.get("DAI"), Some(600.0));
        assert_eq!(debt.get("TEMPLE"), Some(300.0));
    }

    #[test]
    fn test_metric_without_breakdown_adds_nothing() {
        let row = build_row(
            &snapshot(),
            SnapshotMetric::BenchmarkedEquityUsd,
            ConflictPolicy::LastWins,
        )
        .unwrap();
        assert_eq!(keys(&row), BTreeSet::from(["benchmarkedEquityUSD"]));
    }

    #[test]
    fn test_symbol_collision_follows_policy() {
        let mut snap = snapshot();
        snap.strategy_tokens = vec![token("DAI", "1", "10"), token("DAI", "2", "20")];

        let last = build_row(&snap, SnapshotMetric::DebtUsd, ConflictPolicy::LastWins).unwrap();
        assert_eq!(last.get("DAI"), Some(2.0));

        let first = build_row(&snap, SnapshotMetric::DebtUsd, ConflictPolicy::FirstWins).unwrap();
        assert_eq!(first.get("DAI"), Some(1.0));

        assert!(build_row(&snap, SnapshotMetric::DebtUsd, ConflictPolicy::Error).is_err());
    }

    #[test]
    fn test_series_keeps_input_order() {
        let mut later = snapshot();
        later.timestamp = "1700086400".to_string();
        let rows = [snapshot(), later];

        let series =
            build_single_series(&rows, SnapshotMetric::PrincipalUsd, ConflictPolicy::LastWins)
                .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].timestamp, RowTimestamp::Text("1700086400".to_string()));
    }
}
