//! Ranking utilities.

use polars::prelude::*;

use crate::UtilsError;

/// Select the `n` rows with the highest values of `rank_var`.
///
/// Nulls sort last and ties keep their input order.
///
/// # Arguments
/// * `df` - Input table
/// * `n` - Number of rows to keep
/// * `rank_var` - Column to rank by (descending)
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if `rank_var` is absent.
pub fn top_n_by(df: &DataFrame, n: usize, rank_var: &str) -> Result<DataFrame, UtilsError> {
    if df.column(rank_var).is_err() {
        return Err(UtilsError::MissingColumn(rank_var.to_string()));
    }
    let sort_options = SortMultipleOptions::new()
        .with_order_descending(true)
        .with_nulls_last(true)
        .with_maintain_order(true);
    Ok(df.clone().lazy().sort([rank_var], sort_options).limit(n as IdxSize).collect()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_n_by_value() {
        let df = df! {
            "symbol" => &["A", "B", "C", "D"],
            "value" => &[Some(10.0), None, Some(30.0), Some(20.0)],
        }
        .unwrap();

        let result = top_n_by(&df, 2, "value").unwrap();
        let symbols: Vec<Option<&str>> = result.column("symbol").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(symbols, vec![Some("C"), Some("D")]);
    }

    #[test]
    fn nulls_sort_last() {
        let df = df! {
            "symbol" => &["A", "B"],
            "value" => &[None, Some(1.0)],
        }
        .unwrap();

        let result = top_n_by(&df, 5, "value").unwrap();
        assert_eq!(result.height(), 2);
        assert_eq!(result.column("symbol").unwrap().str().unwrap().get(0), Some("B"));
    }

    #[test]
    fn missing_rank_column() {
        let df = df! { "symbol" => &["A"] }.unwrap();
        assert!(top_n_by(&df, 1, "value").is_err());
    }
}
