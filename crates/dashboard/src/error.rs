//! Error types for dashboard sessions.

use std::path::PathBuf;

use healthboard_math::MathError;
use healthboard_traits::LoadError;
use healthboard_utils::UtilsError;

/// Errors that can occur while serving dashboard requests.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Source table could not be loaded.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Table plumbing error.
    #[error("table error: {0}")]
    Utils(#[from] UtilsError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the config schema.
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl DashboardError {
    /// Returns whether the session cannot continue.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Load(_) | Self::ConfigIo { .. } | Self::ConfigParse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DashboardError::Utils(UtilsError::MissingColumn("Price".to_string()));
        assert!(err.to_string().contains("Price"));
    }

    #[test]
    fn load_errors_are_fatal() {
        let err = DashboardError::from(LoadError::NotFound {
            searched: vec![PathBuf::from(".")],
            missing: vec!["Price_2124".to_string()],
        });
        assert!(err.is_fatal());

        let err = DashboardError::Math(MathError::InvalidWindow(0));
        assert!(!err.is_fatal());
    }
}
