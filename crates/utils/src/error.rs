//! Error types for utility functions.

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),
}

impl UtilsError {
    /// Returns whether the error only means an expected column is absent.
    #[must_use]
    pub const fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn(_))
    }
}
