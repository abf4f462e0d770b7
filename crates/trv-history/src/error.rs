#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
