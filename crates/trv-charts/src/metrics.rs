use serde::{Deserialize, Serialize};

use crate::format::{format_big_money, format_percent, format_price};

/// Continuously compounded yearly yield of a nominal annual rate.
pub fn apr_to_apy(apr: f64) -> f64 {
    apr.exp_m1()
}

/// One headline card above the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetric {
    pub title: String,
    pub value: String,
}

impl DashboardMetric {
    fn new(title: &str, value: String) -> Self {
        Self {
            title: title.to_string(),
            value,
        }
    }
}

/// Metric cards laid out in rows. `small_metrics` render below the main
/// rows in a denser style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangedMetrics {
    pub metrics: Vec<Vec<DashboardMetric>>,
    pub small_metrics: Vec<Vec<DashboardMetric>>,
    pub is_shutdown: bool,
}

/// Vault-wide figures shown on the Treasury Reserves Vault dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrvMetrics {
    pub total_market_value: f64,
    pub spot_price: f64,
    pub treasury_price_index: f64,
    pub circulating_supply: f64,
    /// Base rate of the TEMPLE debt token, as an APR fraction
    pub benchmark_rate: f64,
    pub principal: f64,
    pub accrued_interest: f64,
    pub benchmarked_equity: f64,
}

/// Figures of one strategy and its DAI debt position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyMetrics {
    pub value_of_holdings: f64,
    pub benchmarked_equity: f64,
    /// DAI base rate, APR fraction
    pub rate: f64,
    /// Strategy premium on top of `rate`, APR fraction
    pub premium_rate: f64,
    pub debt_share: f64,
    pub debt_ceiling: f64,
    pub debt_ceiling_utilization: f64,
    pub total_repayment: f64,
    pub principal: f64,
    pub accrued_interest: f64,
    pub is_shutdown: bool,
}

impl StrategyMetrics {
    pub fn interest_rate(&self) -> f64 {
        apr_to_apy(self.rate + self.premium_rate)
    }
}

fn usd(value: f64) -> String {
    format!("${}", format_big_money(value))
}

pub fn arrange_trv_metrics(metrics: &TrvMetrics) -> ArrangedMetrics {
    ArrangedMetrics {
        metrics: vec![vec![
            DashboardMetric::new("Total Market Value", usd(metrics.total_market_value)),
            DashboardMetric::new(
                "Spot Price",
                format!("{} DAI", format_price(metrics.spot_price)),
            ),
            DashboardMetric::new(
                "Treasury Price Index",
                format!("{} DAI", format_price(metrics.treasury_price_index)),
            ),
            DashboardMetric::new("Circulating Supply", usd(metrics.circulating_supply)),
            DashboardMetric::new(
                "Benchmark Rate",
                format!("{}% p.a.", format_percent(apr_to_apy(metrics.benchmark_rate))),
            ),
        ]],
        small_metrics: vec![vec![
            DashboardMetric::new("Principal", usd(metrics.principal)),
            DashboardMetric::new("Accrued Interest", usd(metrics.accrued_interest)),
            DashboardMetric::new("Benchmarked Equity", usd(metrics.benchmarked_equity)),
        ]],
        // the vault itself is never shut down
        is_shutdown: false,
    }
}

pub fn arrange_strategy_metrics(metrics: &StrategyMetrics) -> ArrangedMetrics {
    ArrangedMetrics {
        metrics: vec![vec![
            DashboardMetric::new("Value of Holdings", usd(metrics.value_of_holdings)),
            DashboardMetric::new("Benchmarked Equity", usd(metrics.benchmarked_equity)),
            DashboardMetric::new(
                "Interest Rate",
                format!("{}%", format_percent(metrics.interest_rate())),
            ),
        ]],
        small_metrics: vec![
            vec![
                DashboardMetric::new(
                    "Debt Share (DAI)",
                    format!("{}%", format_percent(metrics.debt_share)),
                ),
                DashboardMetric::new(
                    "Debt Ceiling (DAI)",
                    format_big_money(metrics.debt_ceiling),
                ),
                DashboardMetric::new(
                    "Debt Ceiling Utilization",
                    format!("{}%", format_percent(metrics.debt_ceiling_utilization)),
                ),
            ],
            vec![
                DashboardMetric::new("Total Repayment", usd(metrics.total_repayment)),
                DashboardMetric::new("Principal", usd(metrics.principal)),
                DashboardMetric::new("Accrued Interest", usd(metrics.accrued_interest)),
            ],
        ],
        is_shutdown: metrics.is_shutdown,
    }
}
