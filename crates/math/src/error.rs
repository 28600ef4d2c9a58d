//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Window length of zero.
    #[error("invalid window size: {0} (must be at least 1)")]
    InvalidWindow(usize),
}
