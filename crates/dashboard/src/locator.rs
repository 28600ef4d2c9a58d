//! Data directory resolution.

use std::path::{Path, PathBuf};

use healthboard_traits::LoadError;
use tracing::{debug, info};

use crate::{DashboardConfig, SUPPORTED_EXTENSIONS};

/// Probes candidate directories for the source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLocator {
    candidates: Vec<PathBuf>,
}

impl DataLocator {
    /// Create a locator over directories probed in order.
    #[must_use]
    pub const fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Locator over the configured data directories.
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.data_dirs.clone())
    }

    /// Candidate directories, in probing order.
    #[must_use]
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// File for `stem` in `dir` with any supported extension.
    #[must_use]
    pub fn find_file(dir: &Path, stem: &str) -> Option<PathBuf> {
        SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{stem}.{ext}")))
            .find(|path| path.is_file())
    }

    /// First candidate directory holding every stem.
    ///
    /// # Errors
    /// Returns `LoadError::NotFound` listing the probed directories and the
    /// stems missing from the first one if no directory qualifies.
    pub fn locate(&self, stems: &[&str]) -> Result<PathBuf, LoadError> {
        let mut first_missing = None;
        for dir in &self.candidates {
            let missing: Vec<String> = stems
                .iter()
                .filter(|stem| Self::find_file(dir, stem).is_none())
                .map(|stem| (*stem).to_string())
                .collect();
            if missing.is_empty() {
                info!(dir = %dir.display(), "found data directory");
                return Ok(dir.clone());
            }
            debug!(dir = %dir.display(), ?missing, "data directory incomplete");
            first_missing.get_or_insert(missing);
        }
        Err(LoadError::NotFound {
            searched: self.candidates.clone(),
            missing: first_missing.unwrap_or_else(|| stems.iter().map(|s| (*s).to_string()).collect()),
        })
    }
}
