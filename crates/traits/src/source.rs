//! Table source trait definitions.

use std::path::PathBuf;

use polars::prelude::*;

/// Errors that can occur while loading a source table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No candidate location holds every required file.
    #[error("data files not found: missing {missing:?} in {searched:?}")]
    NotFound {
        /// Directories that were probed, in order.
        searched: Vec<PathBuf>,
        /// File stems that could not be found.
        missing: Vec<String>,
    },

    /// File extension not handled by any reader.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// I/O failure while opening a file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Polars error while parsing a file.
    #[error("failed to parse table: {0}")]
    Polars(#[from] PolarsError),
}

impl LoadError {
    /// Returns whether the error means the data is absent rather than unreadable.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A source of one raw table.
///
/// The key is the identity under which the loaded table is memoized: two
/// sources with the same key are assumed to produce the same table.
pub trait TableSource: std::fmt::Debug {
    /// Stable identity of this source.
    fn key(&self) -> &str;

    /// Load the raw table.
    ///
    /// # Errors
    /// Returns `LoadError` if the table cannot be read.
    fn load(&self) -> Result<DataFrame, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(DataFrame);

    impl TableSource for Fixed {
        fn key(&self) -> &str {
            "fixed"
        }

        fn load(&self) -> Result<DataFrame, LoadError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn source_loads_table() {
        let source = Fixed(df! { "Ticker" => &["AAA"] }.unwrap());
        assert_eq!(source.key(), "fixed");
        assert_eq!(source.load().unwrap().height(), 1);
    }

    #[test]
    fn not_found_lists_locations() {
        let err = LoadError::NotFound {
            searched: vec![PathBuf::from("DATA")],
            missing: vec!["Price_2124".to_string()],
        };
        assert!(err.is_missing());
        let msg = err.to_string();
        assert!(msg.contains("DATA"));
        assert!(msg.contains("Price_2124"));
    }

    #[test]
    fn unsupported_format_is_not_missing() {
        let err = LoadError::UnsupportedFormat(PathBuf::from("a.xlsx"));
        assert!(!err.is_missing());
        assert!(err.to_string().contains("a.xlsx"));
    }
}
