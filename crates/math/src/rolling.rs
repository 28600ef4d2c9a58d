//! Trailing moving averages.

use ndarray::Array1;
use polars::prelude::*;

use crate::MathError;

/// Trailing mean over `window` observations.
///
/// The value at position `i` averages `min(window, i + 1)` observations, so
/// the series start is covered by partial windows instead of nulls.
///
/// Eager counterpart of [`TrailingMean::expr`], which must agree with it
/// point for point.
///
/// # Arguments
/// * `data` - Observations in time order
/// * `window` - Window length
///
/// # Errors
/// Returns `MathError::InvalidWindow` if `window` is zero.
pub fn trailing_mean(data: &Array1<f64>, window: usize) -> Result<Array1<f64>, MathError> {
    if window == 0 {
        return Err(MathError::InvalidWindow(window));
    }

    let mut out = Array1::zeros(data.len());
    let mut running = 0.0;
    for (i, &x) in data.iter().enumerate() {
        running += x;
        if i >= window {
            running -= data[i - window];
        }
        out[i] = running / (i + 1).min(window) as f64;
    }
    Ok(out)
}

/// Trailing moving average configuration.
#[derive(Debug, Clone, Copy)]
pub struct TrailingMean {
    window: usize,
}

impl TrailingMean {
    /// Create a new trailing mean.
    ///
    /// # Errors
    /// Returns `MathError::InvalidWindow` if `window` is zero.
    pub const fn new(window: usize) -> Result<Self, MathError> {
        if window == 0 {
            return Err(MathError::InvalidWindow(window));
        }
        Ok(Self { window })
    }

    /// Get the window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Apply to an array.
    ///
    /// Reference result for [`TrailingMean::expr`] on in-memory series.
    ///
    /// # Errors
    /// Never fails for a constructed `TrailingMean`.
    pub fn apply(&self, data: &Array1<f64>) -> Result<Array1<f64>, MathError> {
        trailing_mean(data, self.window)
    }

    /// Expression computing the trailing mean of a column, in row order.
    #[must_use]
    pub fn expr(&self, column: &str) -> Expr {
        col(column).rolling_mean(RollingOptionsFixedWindow {
            window_size: self.window,
            min_periods: 1,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn first_point_is_the_observation() {
        let data = array![4.0, -2.0, 6.0];
        let result = trailing_mean(&data, 20).unwrap();
        assert_relative_eq!(result[0], 4.0);
        assert_relative_eq!(result[1], 1.0);
        assert_relative_eq!(result[2], 8.0 / 3.0);
    }

    #[test]
    fn full_window_uses_exactly_trailing_points() {
        let data = Array1::from_iter((1..=25).map(f64::from));
        let result = trailing_mean(&data, 20).unwrap();
        // Observations 6..=25.
        assert_relative_eq!(result[24], 15.5);
        // Observations 1..=20.
        assert_relative_eq!(result[19], 10.5);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(TrailingMean::new(0), Err(MathError::InvalidWindow(0))));
        assert!(trailing_mean(&array![1.0], 0).is_err());
    }

    #[test]
    fn expression_matches_array() {
        let values: Vec<f64> = (0..40).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let ma = TrailingMean::new(20).unwrap();
        let df = df! { "v" => &values }.unwrap();
        let out = df.lazy().select([ma.expr("v").alias("ma")]).collect().unwrap();
        let from_expr: Vec<f64> =
            out.column("ma").unwrap().f64().unwrap().into_no_null_iter().collect();
        let from_array = ma.apply(&Array1::from_vec(values)).unwrap();
        assert_eq!(from_expr.len(), from_array.len());
        for (a, b) in from_expr.iter().zip(from_array.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }
}
