//! Filtering of the master table.

use std::collections::BTreeSet;

use healthboard_primitives::{
    FilterSpec, Year,
    columns::{BUY_NET_FLAG, CREDIT_RATING, HEALTH_SCORE, INDUSTRY, YEAR},
};
use healthboard_utils::top_n_by;
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    DashboardError,
    frame::{i32_values, str_values},
};

fn any_of<T: Literal>(column: &str, values: impl IntoIterator<Item = T>) -> Expr {
    values.into_iter().fold(lit(false), |acc, v| acc.or(col(column).eq(lit(v))))
}

/// Rows of the master table selected by `spec`.
///
/// All predicates are conjunctive. A predicate on a column the table lacks is
/// vacuous, as are empty industry and rating sets. Null cells never match.
///
/// # Errors
/// Returns `DashboardError::Polars` if a predicate cannot be evaluated.
pub fn apply_filter(master: &DataFrame, spec: &FilterSpec) -> Result<DataFrame, DashboardError> {
    let has = |name: &str| master.column(name).is_ok();
    let mut predicate = lit(true);

    if has(YEAR) {
        predicate = predicate.and(col(YEAR).eq(lit(spec.year)));
    } else {
        warn!("master table has no year column, year filter skipped");
    }
    if !spec.industries.is_empty() && has(INDUSTRY) {
        predicate = predicate.and(any_of(INDUSTRY, spec.industries.iter().map(String::as_str)));
    }
    if !spec.ratings.is_empty() && has(CREDIT_RATING) {
        predicate = predicate.and(any_of(CREDIT_RATING, spec.ratings.iter().map(String::as_str)));
    }
    if has(BUY_NET_FLAG) {
        predicate = predicate.and(any_of(BUY_NET_FLAG, spec.flags()));
    }

    let subset = master.clone().lazy().filter(predicate).collect()?;
    debug!(year = spec.year, rows = subset.height(), "applied filter");
    Ok(subset)
}

/// The `n` healthiest rows of a subset, nulls last; `n == 0` keeps every row.
///
/// # Errors
/// Returns `DashboardError::Utils` if the subset has no health score column.
pub fn top_by_health(subset: &DataFrame, n: usize) -> Result<DataFrame, DashboardError> {
    if n == 0 {
        return Ok(subset.clone());
    }
    Ok(top_n_by(subset, n, HEALTH_SCORE)?)
}

/// Values available for each filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct years, ascending.
    pub years: Vec<Year>,
    /// Distinct industries, nulls excluded.
    pub industries: Vec<String>,
    /// Distinct ratings, nulls excluded.
    pub ratings: Vec<String>,
    /// Latest year, preselected by default.
    pub default_year: Option<Year>,
}

impl FilterOptions {
    /// Collect the options from the master table.
    ///
    /// # Errors
    /// Returns `DashboardError::Polars` if a column has an unexpected type.
    pub fn from_master(master: &DataFrame) -> Result<Self, DashboardError> {
        let years: BTreeSet<Year> = i32_values(master, YEAR)?.into_iter().flatten().collect();
        let industries: BTreeSet<String> =
            str_values(master, INDUSTRY)?.into_iter().flatten().collect();
        let ratings: BTreeSet<String> =
            str_values(master, CREDIT_RATING)?.into_iter().flatten().collect();
        Ok(Self {
            default_year: years.last().copied(),
            years: years.into_iter().collect(),
            industries: industries.into_iter().collect(),
            ratings: ratings.into_iter().collect(),
        })
    }

    /// Filter on the default year with nothing else restricted.
    #[must_use]
    pub fn default_spec(&self) -> Option<FilterSpec> {
        self.default_year.map(FilterSpec::for_year)
    }
}
