use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Snapshot fields that can be selected in the dashboard chart.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SnapshotMetric {
    #[default]
    #[serde(rename = "totalMarketValueUSD")]
    #[strum(serialize = "totalMarketValueUSD")]
    TotalMarketValueUsd,
    #[serde(rename = "accruedInterestUSD")]
    #[strum(serialize = "accruedInterestUSD")]
    AccruedInterestUsd,
    #[serde(rename = "benchmarkedEquityUSD")]
    #[strum(serialize = "benchmarkedEquityUSD")]
    BenchmarkedEquityUsd,
    #[serde(rename = "creditUSD")]
    #[strum(serialize = "creditUSD")]
    CreditUsd,
    #[serde(rename = "debtUSD")]
    #[strum(serialize = "debtUSD")]
    DebtUsd,
    #[serde(rename = "netDebtUSD")]
    #[strum(serialize = "netDebtUSD")]
    NetDebtUsd,
    #[serde(rename = "principalUSD")]
    #[strum(serialize = "principalUSD")]
    PrincipalUsd,
    #[serde(rename = "nominalEquityUSD")]
    #[strum(serialize = "nominalEquityUSD")]
    NominalEquityUsd,
    #[serde(rename = "nominalPerformance")]
    #[strum(serialize = "nominalPerformance")]
    NominalPerformance,
    #[serde(rename = "benchmarkPerformance")]
    #[strum(serialize = "benchmarkPerformance")]
    BenchmarkPerformance,
}

impl SnapshotMetric {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TotalMarketValueUsd => "totalMarketValueUSD",
            Self::AccruedInterestUsd => "accruedInterestUSD",
            Self::BenchmarkedEquityUsd => "benchmarkedEquityUSD",
            Self::CreditUsd => "creditUSD",
            Self::DebtUsd => "debtUSD",
            Self::NetDebtUsd => "netDebtUSD",
            Self::PrincipalUsd => "principalUSD",
            Self::NominalEquityUsd => "nominalEquityUSD",
            Self::NominalPerformance => "nominalPerformance",
            Self::BenchmarkPerformance => "benchmarkPerformance",
        }
    }

    /// Label shown in the metric picker.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TotalMarketValueUsd => "Total Market Value",
            Self::AccruedInterestUsd => "Accrued Interest",
            Self::BenchmarkedEquityUsd => "Benchmarked Equity",
            Self::CreditUsd => "Credit",
            Self::DebtUsd => "Debt",
            Self::NetDebtUsd => "Net Debt",
            Self::PrincipalUsd => "Principal",
            Self::NominalEquityUsd => "Nominal Equity",
            Self::NominalPerformance => "Nominal Performance",
            Self::BenchmarkPerformance => "Benchmark Performance",
        }
    }

    pub const fn unit(&self) -> MetricUnit {
        match self {
            Self::NominalPerformance | Self::BenchmarkPerformance => MetricUnit::Percent,
            _ => MetricUnit::Usd,
        }
    }

    /// Metrics that are always charted next to this one for a single strategy.
    pub const fn companions(&self) -> &'static [Self] {
        match self {
            Self::NetDebtUsd => &[Self::DebtUsd, Self::CreditUsd],
            _ => &[],
        }
    }

    /// Per-token field that decomposes this metric across the strategy assets.
    pub const fn token_breakdown(&self) -> Option<TokenMetric> {
        match self {
            Self::DebtUsd => Some(TokenMetric::DebtUsd),
            Self::CreditUsd => Some(TokenMetric::CreditUsd),
            Self::PrincipalUsd => Some(TokenMetric::PrincipalUsd),
            Self::AccruedInterestUsd => Some(TokenMetric::AccruedInterestUsd),
            Self::TotalMarketValueUsd => Some(TokenMetric::MarketValueUsd),
            Self::BenchmarkedEquityUsd
            | Self::NetDebtUsd
            | Self::NominalEquityUsd
            | Self::NominalPerformance
            | Self::BenchmarkPerformance => None,
        }
    }

    /// Resolves a user supplied metric id, falling back to the default metric
    /// when the id is missing or unknown.
    pub fn from_param(param: Option<&str>) -> Self {
        param.and_then(|p| p.parse().ok()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum MetricUnit {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "%")]
    Percent,
}

impl MetricUnit {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Percent => "%",
        }
    }
}

/// Numeric fields carried by every entry of `strategyTokens`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum TokenMetric {
    #[serde(rename = "debtUSD")]
    DebtUsd,
    #[serde(rename = "creditUSD")]
    CreditUsd,
    #[serde(rename = "principalUSD")]
    PrincipalUsd,
    #[serde(rename = "accruedInterestUSD")]
    AccruedInterestUsd,
    #[serde(rename = "marketValueUSD")]
    MarketValueUsd,
}

impl TokenMetric {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DebtUsd => "debtUSD",
            Self::CreditUsd => "creditUSD",
            Self::PrincipalUsd => "principalUSD",
            Self::AccruedInterestUsd => "accruedInterestUSD",
            Self::MarketValueUsd => "marketValueUSD",
        }
    }
}
