pub mod config;
pub mod error;
pub mod pages;
pub mod query;
pub mod range;
pub mod table;

pub use config::HistoryConfig;
pub use error::HistoryError;
pub use pages::{PageWindow, total_pages};
pub use query::{RowFilter, TxOrder, TxPage, TxQuery, available_rows, query_page, since_timestamp};
pub use range::{PageItem, RangeLayout, pagination_range, should_render};
pub use table::{TableRow, build_table_rows};
