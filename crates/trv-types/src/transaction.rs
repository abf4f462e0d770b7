use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::snapshot::leading_integer;

/// A strategy transaction row from the subgraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub strategy_name: String,
    pub token_symbol: String,
    /// Decimal amount as a string, e.g. `"1250.4471"`
    pub amount: String,
    /// Transaction kind as named on-chain, e.g. `Borrow` or `Repay`
    pub kind: String,
    /// Seconds since epoch
    pub timestamp: String,
}

impl TransactionRecord {
    pub fn timestamp_secs(&self) -> Option<i64> {
        leading_integer(&self.timestamp)
    }
}

/// Time window selected above the transaction history table.
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
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TxHistoryFilter {
    #[default]
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "last30days")]
    #[serde(rename = "last30days")]
    Last30Days,
    #[strum(serialize = "lastweek")]
    #[serde(rename = "lastweek")]
    LastWeek,
}

impl TxHistoryFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Last30Days => "last30days",
            Self::LastWeek => "lastweek",
        }
    }

    pub const fn window_secs(&self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Last30Days => Some(30 * 86_400),
            Self::LastWeek => Some(7 * 86_400),
        }
    }
}

/// Sortable columns of the transaction history table.
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
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TableHeader {
    #[default]
    Date,
    Strategy,
    Type,
    Token,
    Amount,
    #[strum(to_string = "TxHash", serialize = "hash")]
    TxHash,
}

impl TableHeader {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Strategy => "Strategy",
            Self::Type => "Type",
            Self::Token => "Token",
            Self::Amount => "Amount",
            Self::TxHash => "TxHash",
        }
    }
}

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
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

impl OrderDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_windows() {
        assert_eq!(TxHistoryFilter::All.window_secs(), None);
        assert_eq!(TxHistoryFilter::LastWeek.window_secs(), Some(604_800));
        assert_eq!(
            "Last30Days".parse::<TxHistoryFilter>().unwrap(),
            TxHistoryFilter::Last30Days
        );
    }

    #[test]
    fn test_table_header_parsing() {
        assert_eq!("amount".parse::<TableHeader>().unwrap(), TableHeader::Amount);
        assert_eq!("txhash".parse::<TableHeader>().unwrap(), TableHeader::TxHash);
        assert_eq!("hash".parse::<TableHeader>().unwrap(), TableHeader::TxHash);
    }

    #[test]
    fn test_transaction_row_deserialize() {
        let tx: TransactionRecord = serde_json::from_value(serde_json::json!({
            "hash": "0xabc",
            "strategyName": "TlcStrategy",
            "tokenSymbol": "DAI",
            "amount": "12.345",
            "kind": "Borrow",
            "timestamp": "1700000000"
        }))
        .unwrap();
        assert_eq!(tx.timestamp_secs(), Some(1_700_000_000));
        assert_eq!(tx.token_symbol, "DAI");
    }
}
