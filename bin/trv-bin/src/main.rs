mod cli;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use serde::{Serialize, de::DeserializeOwned};
use tracing_subscriber::EnvFilter;

use trv_charts::{
    ChartConfig, ChartRequest, IntervalWindow, Palette, StrategyMetrics, TrvMetrics,
    arrange_strategy_metrics, arrange_trv_metrics, build_chart,
};
use trv_history::{
    HistoryConfig, RowFilter, TxOrder, TxQuery, pagination_range, query_page, should_render,
};
use trv_types::{ChartMode, OrderDirection, SnapshotMetric, SnapshotRecord, TransactionRecord};

use crate::cli::{ChartArgs, Cli, Command, HistoryArgs, MetricsArgs, PagesArgs};

fn init_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn run_chart(args: ChartArgs) -> Result<()> {
    let daily = args
        .daily
        .as_deref()
        .map(read_json::<Vec<SnapshotRecord>>)
        .transpose()?;
    let hourly = args
        .hourly
        .as_deref()
        .map(read_json::<Vec<SnapshotRecord>>)
        .transpose()?;

    let metric = SnapshotMetric::from_param(args.metric.as_deref());
    let mut request = ChartRequest::for_dashboard(args.dashboard, metric, args.interval);
    if !args.strategies.is_empty() {
        request.mode = if args.strategies.len() == 1 {
            ChartMode::SingleStrategy
        } else {
            ChartMode::Aggregate
        };
        request.strategies = args.strategies;
    }

    let mut config = ChartConfig::default().with_conflict_policy(args.conflict_policy);
    if args.lookback {
        config = config.with_window(IntervalWindow::Lookback);
    }
    if !args.palette.is_empty() {
        config = config.with_palette(Palette::new(args.palette)?);
    }

    let chart = build_chart(daily.as_deref(), hourly.as_deref(), &request, &config)
        .context("Failed to build chart data")?;
    if chart.is_empty() {
        tracing::info!(
            interval = request.interval.as_str(),
            "No rows for the selected interval"
        );
    }

    print_json(&chart)
}

fn run_pages(args: PagesArgs) -> Result<()> {
    let range = pagination_range(args.current, args.total);
    if should_render(&range, args.current) {
        print_json(&range)
    } else {
        print_json(&Vec::<i64>::new())
    }
}

fn run_history(args: HistoryArgs) -> Result<()> {
    let transactions: Vec<TransactionRecord> = read_json(&args.transactions)?;

    let defaults = HistoryConfig::default();
    let config = HistoryConfig {
        rows_per_page: args.rows_per_page.unwrap_or(defaults.rows_per_page),
        max_fetch_rows: args.max_fetch_rows.unwrap_or(defaults.max_fetch_rows),
    };
    let query = TxQuery {
        filter: args.filter,
        row_filter: RowFilter {
            kind: args.kind,
            strategy: args.strategy_filter,
            token: args.token,
        },
        order: TxOrder {
            header: args.order_by,
            direction: if args.asc {
                OrderDirection::Asc
            } else {
                OrderDirection::Desc
            },
        },
        page: args.page,
    };
    let protocol_tx_count = args
        .protocol_tx_count
        .or_else(|| u64::try_from(transactions.len()).ok());
    let now = args.now.unwrap_or_else(|| chrono::Utc::now().timestamp());

    let page = query_page(
        &transactions,
        args.dashboard,
        &query,
        protocol_tx_count,
        now,
        &config,
    );

    print_json(&page)
}

fn run_metrics(args: MetricsArgs) -> Result<()> {
    let arranged = if args.dashboard.is_trv() {
        arrange_trv_metrics(&read_json::<TrvMetrics>(&args.input)?)
    } else {
        arrange_strategy_metrics(&read_json::<StrategyMetrics>(&args.input)?)
    };
    if arranged.is_shutdown {
        tracing::info!(dashboard = args.dashboard.as_str(), "Strategy is shut down");
    }

    print_json(&arranged)
}

fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Command::Chart(args) => run_chart(args),
        Command::Pages(args) => run_pages(args),
        Command::History(args) => run_history(args),
        Command::Metrics(args) => run_metrics(args),
    }
}
