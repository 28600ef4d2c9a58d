//! Null-tolerant reductions.
//!
//! Every reduction skips `None` and NaN inputs. Reductions that have no
//! meaningful value over an empty input return `None`.

use ndarray::{Array1, s};

fn valid<I>(values: I) -> impl Iterator<Item = f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().filter(|v| !v.is_nan())
}

/// Arithmetic mean of the valid values.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (total, count) = valid(values).fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    (count > 0).then(|| total / count as f64)
}

/// Largest valid value.
pub fn max<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    valid(values).reduce(f64::max)
}

/// Smallest valid value.
pub fn min<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    valid(values).reduce(f64::min)
}

/// Sum of the valid values, 0 when there are none.
pub fn sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    valid(values).sum()
}

/// Share of `true` flags, in percent.
///
/// # Returns
/// `None` for an empty input.
pub fn percentage<I>(flags: I) -> Option<f64>
where
    I: IntoIterator<Item = bool>,
{
    let (hits, count) =
        flags.into_iter().fold((0usize, 0usize), |(h, n), f| (h + usize::from(f), n + 1));
    (count > 0).then(|| hits as f64 / count as f64 * 100.0)
}

/// Mean of the last `n` observations, or of all of them when fewer exist.
///
/// # Arguments
/// * `data` - Observations in time order
/// * `n` - Number of trailing observations
///
/// # Returns
/// `None` if `data` is empty or `n` is zero.
#[must_use]
pub fn tail_mean(data: &Array1<f64>, n: usize) -> Option<f64> {
    if data.is_empty() || n == 0 {
        return None;
    }
    let start = data.len().saturating_sub(n);
    data.slice(s![start..]).mean()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn mean_skips_missing_and_nan() {
        let values = [Some(1.0), None, Some(f64::NAN), Some(3.0)];
        assert_relative_eq!(mean(values).unwrap(), 2.0);
    }

    #[test]
    fn all_missing_is_none() {
        let values = [None, Some(f64::NAN)];
        assert_eq!(mean(values), None);
        assert_eq!(max(values), None);
        assert_eq!(min(values), None);
        assert_relative_eq!(sum(values), 0.0);
    }

    #[test]
    fn extremes_ignore_missing() {
        let values = [Some(-2.0), None, Some(7.5), Some(f64::NAN), Some(0.0)];
        assert_relative_eq!(max(values).unwrap(), 7.5);
        assert_relative_eq!(min(values).unwrap(), -2.0);
        assert_relative_eq!(sum(values), 5.5);
    }

    #[rstest]
    #[case(&[true, false, true, true], Some(75.0))]
    #[case(&[false, false], Some(0.0))]
    #[case(&[], None)]
    fn percentage_of_flags(#[case] flags: &[bool], #[case] expected: Option<f64>) {
        assert_eq!(percentage(flags.iter().copied()), expected);
    }

    #[rstest]
    #[case(2, 3.5)]
    #[case(4, 2.5)]
    #[case(30, 2.5)]
    fn tail_mean_uses_available_points(#[case] n: usize, #[case] expected: f64) {
        let data = array![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(tail_mean(&data, n).unwrap(), expected);
    }

    #[test]
    fn tail_mean_empty() {
        assert_eq!(tail_mean(&Array1::zeros(0), 30), None);
        assert_eq!(tail_mean(&array![1.0], 0), None);
    }
}
