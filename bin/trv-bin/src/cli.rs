use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use trv_charts::ConflictPolicy;
use trv_types::{ChartInterval, DashboardKey, TableHeader, TxHistoryFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "TRV dashboard data pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build chart data from strategy snapshot feeds
    Chart(ChartArgs),
    /// Print the pagination control for a page
    Pages(PagesArgs),
    /// Print one page of the transaction history table
    History(HistoryArgs),
    /// Arrange the headline metric cards of a dashboard
    Metrics(MetricsArgs),
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// JSON array of daily strategy snapshots
    #[arg(long, env = "TRV_DAILY_SNAPSHOTS")]
    pub daily: Option<PathBuf>,

    /// JSON array of hourly strategy snapshots, backing the 1D interval
    #[arg(long, env = "TRV_HOURLY_SNAPSHOTS")]
    pub hourly: Option<PathBuf>,

    /// Dashboard whose strategies are charted
    #[arg(long, env = "TRV_DASHBOARD", default_value = DashboardKey::TRV_KEY)]
    pub dashboard: DashboardKey,

    /// Chart these strategies instead of the dashboard's own
    #[arg(
        long = "strategy",
        env = "TRV_CHART_STRATEGIES",
        value_delimiter = ',',
        value_name = "NAME"
    )]
    pub strategies: Vec<String>,

    /// Metric id, unknown ids fall back to totalMarketValueUSD
    #[arg(long, env = "TRV_CHART_METRIC")]
    pub metric: Option<String>,

    #[arg(long, env = "TRV_CHART_INTERVAL", default_value = "1M")]
    pub interval: ChartInterval,

    /// Trim each interval to its own length back from the newest row
    #[arg(long, env = "TRV_CHART_LOOKBACK")]
    pub lookback: bool,

    #[arg(long, env = "TRV_CONFLICT_POLICY", default_value = "last_wins")]
    pub conflict_policy: ConflictPolicy,

    #[arg(
        long,
        env = "TRV_CHART_PALETTE",
        value_delimiter = ',',
        value_name = "COLOR",
        help = "Comma-separated list of series colors"
    )]
    pub palette: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PagesArgs {
    #[arg(long, env = "TRV_CURRENT_PAGE")]
    pub current: u32,

    #[arg(long, env = "TRV_TOTAL_PAGES")]
    pub total: u32,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// JSON array of strategy transactions
    #[arg(long, env = "TRV_TRANSACTIONS")]
    pub transactions: PathBuf,

    #[arg(long, env = "TRV_DASHBOARD", default_value = DashboardKey::TRV_KEY)]
    pub dashboard: DashboardKey,

    #[arg(long, env = "TRV_TX_FILTER", default_value = "all")]
    pub filter: TxHistoryFilter,

    #[arg(long, env = "TRV_TX_PAGE", default_value_t = 1)]
    pub page: u32,

    #[arg(long, env = "TRV_ROWS_PER_PAGE")]
    pub rows_per_page: Option<u32>,

    /// Row ceiling of a single subgraph query
    #[arg(long, env = "TRV_MAX_FETCH_ROWS")]
    pub max_fetch_rows: Option<u64>,

    #[arg(long, env = "TRV_TX_ORDER_BY", default_value = "Date")]
    pub order_by: TableHeader,

    /// Sort ascending instead of newest/largest first
    #[arg(long, env = "TRV_TX_ASC")]
    pub asc: bool,

    #[arg(long, env = "TRV_TX_KIND")]
    pub kind: Option<String>,

    #[arg(long, env = "TRV_TX_STRATEGY")]
    pub strategy_filter: Option<String>,

    #[arg(long, env = "TRV_TX_TOKEN")]
    pub token: Option<String>,

    /// Protocol-wide transaction count, defaults to the file's row count
    #[arg(long, env = "TRV_PROTOCOL_TX_COUNT")]
    pub protocol_tx_count: Option<u64>,

    /// Reference time in seconds for the date filters, defaults to now
    #[arg(long, env = "TRV_NOW")]
    pub now: Option<i64>,
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// JSON object of vault or strategy figures, matching the dashboard
    #[arg(long, env = "TRV_METRICS")]
    pub input: PathBuf,

    #[arg(long, env = "TRV_DASHBOARD", default_value = DashboardKey::TRV_KEY)]
    pub dashboard: DashboardKey,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_every_option_has_env_fallback() {
        let cli = Cli::command();
        for sub in cli.get_subcommands() {
            for arg in sub.get_arguments() {
                let id = arg.get_id().as_str();
                if id == "help" || id == "version" {
                    continue;
                }
                assert!(
                    arg.get_env().is_some(),
                    "{} --{id} has no env fallback",
                    sub.get_name()
                );
            }
        }
    }

    #[test]
    fn test_parse_metrics_command() {
        let cli = Cli::try_parse_from([
            "trv-bin",
            "metrics",
            "--input",
            "tlc.json",
            "--dashboard",
            "TlcStrategy",
        ])
        .unwrap();
        let Command::Metrics(args) = cli.command else {
            panic!("expected metrics command");
        };
        assert_eq!(args.input, PathBuf::from("tlc.json"));
        assert!(!args.dashboard.is_trv());
    }

    #[test]
    fn test_chart_strategies_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "trv-bin",
            "chart",
            "--strategy",
            "RamosStrategy,TlcStrategy",
        ])
        .unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(args.strategies, vec!["RamosStrategy", "TlcStrategy"]);
    }
}
