use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use trv_types::{DashboardKey, OrderDirection, TableHeader, TransactionRecord, TxHistoryFilter};

use crate::{
    config::HistoryConfig,
    pages::{PageWindow, total_pages},
    range::{PageItem, pagination_range, should_render},
    table::{TableRow, build_table_rows, parse_decimal},
};

/// Oldest timestamp (exclusive, seconds) admitted by `filter` at `now_secs`.
pub fn since_timestamp(filter: TxHistoryFilter, now_secs: i64) -> i64 {
    filter
        .window_secs()
        .map_or(0, |window| now_secs.saturating_sub(window))
}

/// Free-text filters typed into the table header. Empty text is no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl RowFilter {
    fn terms(&self) -> [Option<&str>; 3] {
        [&self.kind, &self.strategy, &self.token].map(|term| {
            term.as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
        })
    }

    pub fn has_row_filters(&self) -> bool {
        self.terms().iter().any(Option::is_some)
    }

    pub fn matches(&self, tx: &TransactionRecord) -> bool {
        let [kind, strategy, token] = self.terms();
        contains_ignore_case(&tx.kind, kind)
            && contains_ignore_case(&tx.strategy_name, strategy)
            && contains_ignore_case(&tx.token_symbol, token)
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

/// Column and direction the table is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOrder {
    pub header: TableHeader,
    pub direction: OrderDirection,
}

impl TxOrder {
    /// Subgraph field backing the column.
    pub const fn field(&self) -> &'static str {
        match self.header {
            TableHeader::Date => "timestamp",
            TableHeader::Strategy => "strategy__name",
            TableHeader::Type => "name",
            TableHeader::Token => "token__symbol",
            TableHeader::Amount => "amount",
            TableHeader::TxHash => "hash",
        }
    }

    pub fn compare(&self, a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
        let ordering = match self.header {
            TableHeader::Date => a.timestamp_secs().cmp(&b.timestamp_secs()),
            TableHeader::Strategy => a.strategy_name.cmp(&b.strategy_name),
            TableHeader::Type => a.kind.cmp(&b.kind),
            TableHeader::Token => a.token_symbol.cmp(&b.token_symbol),
            TableHeader::Amount => parse_decimal(&a.amount)
                .ok()
                .cmp(&parse_decimal(&b.amount).ok()),
            TableHeader::TxHash => a.hash.cmp(&b.hash),
        };
        match self.direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        }
    }
}

/// State of the history table controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxQuery {
    #[serde(default)]
    pub filter: TxHistoryFilter,
    #[serde(default)]
    pub row_filter: RowFilter,
    #[serde(default)]
    pub order: TxOrder,
    /// 1-based
    pub page: u32,
}

impl Default for TxQuery {
    fn default() -> Self {
        Self {
            filter: TxHistoryFilter::default(),
            row_filter: RowFilter::default(),
            order: TxOrder::default(),
            page: 1,
        }
    }
}

/// Rows the table may page through.
///
/// Only the unfiltered aggregate view can trust the protocol-wide counter;
/// every other view counts what was fetched, which the subgraph caps.
pub fn available_rows(
    dashboard: DashboardKey,
    query: &TxQuery,
    protocol_tx_count: Option<u64>,
    fetched_rows: usize,
    max_fetch_rows: u64,
) -> u64 {
    let unfiltered = dashboard.is_trv()
        && query.filter == TxHistoryFilter::All
        && !query.row_filter.has_row_filters();

    match protocol_tx_count {
        Some(count) if unfiltered => count,
        _ => u64::try_from(fetched_rows)
            .unwrap_or(u64::MAX)
            .min(max_fetch_rows),
    }
}

/// One rendered page of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPage {
    pub rows: Vec<TableRow>,
    pub current_page: u32,
    pub total_rows: u64,
    pub total_pages: u32,
    /// Empty when the control is hidden
    pub pagination: Vec<PageItem>,
}

/// Filters, orders and paginates `transactions` for `dashboard`.
pub fn query_page(
    transactions: &[TransactionRecord],
    dashboard: DashboardKey,
    query: &TxQuery,
    protocol_tx_count: Option<u64>,
    now_secs: i64,
    config: &HistoryConfig,
) -> TxPage {
    let since = since_timestamp(query.filter, now_secs);
    let strategies = dashboard.strategy_names();

    let mut matched: Vec<&TransactionRecord> = transactions
        .iter()
        .filter(|tx| dashboard.is_trv() || strategies.contains(&tx.strategy_name))
        .filter(|tx| tx.timestamp_secs().is_some_and(|ts| ts > since))
        .filter(|tx| query.row_filter.matches(tx))
        .collect();
    matched.sort_by(|a, b| query.order.compare(a, b));

    let total_rows = available_rows(
        dashboard,
        query,
        protocol_tx_count,
        matched.len(),
        config.max_fetch_rows,
    );
    let total_pages = total_pages(total_rows, config.rows_per_page);
    let window = PageWindow::for_page(query.page, config.rows_per_page);
    let rows = build_table_rows(window.slice(&matched).iter().copied());

    let range = pagination_range(query.page, total_pages);
    let pagination = if should_render(&range, query.page) {
        range
    } else {
        Vec::new()
    };

    tracing::debug!(
        dashboard = dashboard.as_str(),
        filter = query.filter.as_str(),
        order = query.order.field(),
        matched = matched.len(),
        total_rows,
        page = query.page,
        "Queried transaction history"
    );

    TxPage {
        rows,
        current_page: query.page,
        total_rows,
        total_pages,
        pagination,
    }
}
