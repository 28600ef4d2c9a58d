//! File and in-memory table sources.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use healthboard_traits::{LoadError, TableSource};
use polars::prelude::*;
use tracing::info;

/// File extensions the readers understand, in probing order.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["csv", "parquet"];

/// Read a table, choosing the reader by file extension.
///
/// # Errors
/// Returns `LoadError::Io` if the file cannot be opened,
/// `LoadError::UnsupportedFormat` for unknown extensions and
/// `LoadError::Polars` if parsing fails.
pub fn read_table(path: &Path) -> Result<DataFrame, LoadError> {
    let extension =
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).unwrap_or_default();
    let file = File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

    let df = match extension.as_str() {
        "csv" => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?,
        "parquet" => ParquetReader::new(file).finish()?,
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };
    info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded table");
    Ok(df)
}

/// A table read from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    key: String,
}

impl FileSource {
    /// Create a source for a file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = format!("file:{}", path.display());
        Self { path, key }
    }

    /// Get the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<DataFrame, LoadError> {
        read_table(&self.path)
    }
}

/// A table already held in memory.
#[derive(Debug, Clone)]
pub struct FrameSource {
    key: String,
    frame: DataFrame,
}

impl FrameSource {
    /// Wrap a frame under an identity key.
    #[must_use]
    pub fn new(key: impl Into<String>, frame: DataFrame) -> Self {
        Self { key: format!("frame:{}", key.into()), frame }
    }
}

impl TableSource for FrameSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> Result<DataFrame, LoadError> {
        Ok(self.frame.clone())
    }
}
