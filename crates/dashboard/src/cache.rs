//! Memoization of raw and derived tables.

use std::{collections::HashMap, fmt};

use healthboard_traits::{LoadError, TableSource};
use polars::prelude::*;
use tracing::debug;

/// Identity of a derived table: the stage that produced it and its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DerivedKey {
    stage: &'static str,
    inputs: Vec<String>,
}

impl DerivedKey {
    /// Create a key for `stage` applied to `inputs`.
    #[must_use]
    pub fn new<I, S>(stage: &'static str, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { stage, inputs: inputs.into_iter().map(Into::into).collect() }
    }

    /// Stage name.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        self.stage
    }
}

impl fmt::Display for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.stage, self.inputs.join(", "))
    }
}

/// Tables loaded or derived once per session.
///
/// Raw tables are keyed by [`TableSource::key`], derived tables by
/// [`DerivedKey`]. Entries live until [`TableCache::clear`].
#[derive(Debug, Default)]
pub struct TableCache {
    raw: HashMap<String, DataFrame>,
    derived: HashMap<DerivedKey, DataFrame>,
    hits: usize,
    misses: usize,
}

impl TableCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a raw table, reading the source only on first use.
    ///
    /// # Errors
    /// Returns the source's `LoadError`; failures are not cached.
    pub fn load(&mut self, source: &dyn TableSource) -> Result<DataFrame, LoadError> {
        if let Some(df) = self.raw.get(source.key()) {
            self.hits += 1;
            debug!(key = source.key(), "raw table cache hit");
            return Ok(df.clone());
        }
        self.misses += 1;
        let df = source.load()?;
        self.raw.insert(source.key().to_string(), df.clone());
        Ok(df)
    }

    /// Get a derived table, computing it with `compute` on first use.
    ///
    /// # Errors
    /// Returns the error of `compute`; failures are not cached.
    pub fn derive<E, F>(&mut self, key: DerivedKey, compute: F) -> Result<DataFrame, E>
    where
        F: FnOnce() -> Result<DataFrame, E>,
    {
        if let Some(df) = self.derived.get(&key) {
            self.hits += 1;
            debug!(%key, "derived table cache hit");
            return Ok(df.clone());
        }
        self.misses += 1;
        let df = compute()?;
        debug!(%key, rows = df.height(), "derived table computed");
        self.derived.insert(key, df.clone());
        Ok(df)
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.derived.clear();
    }

    /// Number of lookups served from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Number of lookups that had to load or compute.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Number of cached tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len() + self.derived.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
