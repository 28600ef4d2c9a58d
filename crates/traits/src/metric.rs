//! Metric trait definitions.

use polars::prelude::*;

/// A scalar reduction over a record subset.
///
/// Metrics never fail on missing data: when a required column is absent the
/// metric is unavailable and [`Metric::compute`] decides what to report.
pub trait Metric: std::fmt::Debug {
    /// Returns the metric name.
    fn name(&self) -> &str;

    /// Columns the metric reads.
    fn required_columns(&self) -> &[&str];

    /// Whether every required column is present.
    fn is_available(&self, df: &DataFrame) -> bool {
        self.required_columns().iter().all(|c| df.column(c).is_ok())
    }

    /// Compute the metric.
    ///
    /// Returns `None` when the metric has no value for this subset.
    ///
    /// # Errors
    /// Returns `PolarsError` if a column has an unexpected type.
    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>>;
}
