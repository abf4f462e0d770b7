use std::str::FromStr;

use chrono::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use trv_types::TransactionRecord;

use crate::error::HistoryError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One rendered row of the transaction history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub date: String,
    pub strategy: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
    /// Fixed to two decimals
    pub amount: Decimal,
    pub tx_hash: String,
}

impl TryFrom<&TransactionRecord> for TableRow {
    type Error = HistoryError;

    fn try_from(tx: &TransactionRecord) -> Result<Self, Self::Error> {
        let date = tx
            .timestamp_secs()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| HistoryError::InvalidTimestamp(tx.timestamp.clone()))?
            .format(DATE_FORMAT)
            .to_string();

        Ok(Self {
            date,
            strategy: tx.strategy_name.clone(),
            kind: tx.kind.clone(),
            token: tx.token_symbol.clone(),
            amount: parse_amount(&tx.amount)?,
            tx_hash: tx.hash.clone(),
        })
    }
}

/// Exact decimal value of a subgraph amount.
pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal, HistoryError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| HistoryError::InvalidAmount(raw.to_string()))
}

/// Amount as displayed: fixed to two decimals.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, HistoryError> {
    let mut amount =
        parse_decimal(raw)?.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    Ok(amount)
}

/// Table rows for `transactions`, skipping the ones that cannot be rendered.
pub fn build_table_rows<'a, I>(transactions: I) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    transactions
        .into_iter()
        .filter_map(|tx| match TableRow::try_from(tx) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(hash = %tx.hash, error = %e, "Skipping transaction row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: &str, timestamp: &str) -> TransactionRecord {
        TransactionRecord {
            hash: "0xabc".into(),
            strategy_name: "TlcStrategy".into(),
            token_symbol: "DAI".into(),
            amount: amount.into(),
            kind: "Borrow".into(),
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn test_row_formatting() {
        let row = TableRow::try_from(&tx("1250.4471", "1704466800")).unwrap();
        assert_eq!(row.date, "2024-01-05");
        assert_eq!(row.amount.to_string(), "1250.45");
        assert_eq!(row.kind, "Borrow");
    }

    #[test]
    fn test_amount_rounds_half_away_from_zero() {
        assert_eq!(parse_amount("2.345").unwrap().to_string(), "2.35");
        assert_eq!(parse_amount("-2.345").unwrap().to_string(), "-2.35");
        assert_eq!(parse_amount("1e3").unwrap(), Decimal::from(1000));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let txs = vec![
            tx("abc", "1704466800"),
            tx("1", "never"),
            tx("3.1", "1704466800"),
        ];
        let rows = build_table_rows(&txs);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount.to_string(), "3.10");
    }

    #[test]
    fn test_serialized_row() {
        let json = serde_json::to_value(TableRow::try_from(&tx("7", "0")).unwrap()).unwrap();
        assert_eq!(json["date"], "1970-01-01");
        assert_eq!(json["type"], "Borrow");
        assert_eq!(json["txHash"], "0xabc");
        assert_eq!(json["amount"], "7.00");
    }
}
