#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Duplicate value for {key} in bucket {bucket}")]
    DuplicateEntry { bucket: String, key: String },
    #[error("Palette must contain at least one color")]
    EmptyPalette,
}
