use serde::{Deserialize, Serialize};

use crate::metric::{SnapshotMetric, TokenMetric};

/// One strategy snapshot as served by the subgraph.
///
/// Every numeric field is a decimal string; `timestamp` is in seconds and
/// `timeframe` is the UTC midnight bucket the snapshot belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub timestamp: String,
    pub timeframe: String,
    pub strategy_name: String,
    #[serde(rename = "totalMarketValueUSD", default)]
    pub total_market_value_usd: String,
    #[serde(rename = "debtUSD", default)]
    pub debt_usd: String,
    #[serde(rename = "netDebtUSD", default)]
    pub net_debt_usd: String,
    #[serde(rename = "creditUSD", default)]
    pub credit_usd: String,
    #[serde(rename = "principalUSD", default)]
    pub principal_usd: String,
    #[serde(rename = "accruedInterestUSD", default)]
    pub accrued_interest_usd: String,
    #[serde(rename = "benchmarkedEquityUSD", default)]
    pub benchmarked_equity_usd: String,
    #[serde(rename = "nominalEquityUSD", default)]
    pub nominal_equity_usd: String,
    #[serde(default)]
    pub nominal_performance: String,
    #[serde(default)]
    pub benchmark_performance: String,
    #[serde(default)]
    pub strategy_tokens: Vec<TokenBreakdown>,
}

impl SnapshotRecord {
    /// Raw value of `metric` on this snapshot.
    pub fn metric(&self, metric: SnapshotMetric) -> &str {
        match metric {
            SnapshotMetric::TotalMarketValueUsd => &self.total_market_value_usd,
            SnapshotMetric::AccruedInterestUsd => &self.accrued_interest_usd,
            SnapshotMetric::BenchmarkedEquityUsd => &self.benchmarked_equity_usd,
            SnapshotMetric::CreditUsd => &self.credit_usd,
            SnapshotMetric::DebtUsd => &self.debt_usd,
            SnapshotMetric::NetDebtUsd => &self.net_debt_usd,
            SnapshotMetric::PrincipalUsd => &self.principal_usd,
            SnapshotMetric::NominalEquityUsd => &self.nominal_equity_usd,
            SnapshotMetric::NominalPerformance => &self.nominal_performance,
            SnapshotMetric::BenchmarkPerformance => &self.benchmark_performance,
        }
    }

    /// Timestamp as integer seconds, reading only the leading digits.
    pub fn timestamp_secs(&self) -> Option<i64> {
        leading_integer(&self.timestamp)
    }
}

/// Contribution of one underlying asset to the strategy metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenBreakdown {
    pub symbol: String,
    #[serde(rename = "debtUSD", default)]
    pub debt_usd: String,
    #[serde(rename = "creditUSD", default)]
    pub credit_usd: String,
    #[serde(rename = "principalUSD", default)]
    pub principal_usd: String,
    #[serde(rename = "accruedInterestUSD", default)]
    pub accrued_interest_usd: String,
    #[serde(rename = "marketValueUSD", default)]
    pub market_value_usd: String,
}

impl TokenBreakdown {
    pub fn value(&self, metric: TokenMetric) -> &str {
        match metric {
            TokenMetric::DebtUsd => &self.debt_usd,
            TokenMetric::CreditUsd => &self.credit_usd,
            TokenMetric::PrincipalUsd => &self.principal_usd,
            TokenMetric::AccruedInterestUsd => &self.accrued_interest_usd,
            TokenMetric::MarketValueUsd => &self.market_value_usd,
        }
    }
}

/// Integer prefix of `raw` after leading whitespace, with an optional sign.
/// `"1700000000.75"` reads as `1700000000`, `"abc"` as `None`.
pub fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
