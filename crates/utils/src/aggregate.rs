//! Daily to yearly aggregation.

use healthboard_primitives::columns::{AVG_PRICE, MAX_PRICE, MIN_PRICE, PRICE, TICKER, YEAR};
use polars::prelude::*;
use tracing::debug;

use crate::UtilsError;

fn require(df: &DataFrame, columns: &[&str]) -> Result<(), UtilsError> {
    match columns.iter().find(|c| df.column(c).is_err()) {
        Some(missing) => Err(UtilsError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}

/// Group a normalized daily table by (Ticker, Year) and apply `aggs`.
///
/// Rows whose year or ticker is null are dropped first.
fn group_yearly(df: &DataFrame, value: &str, aggs: Vec<Expr>) -> Result<DataFrame, UtilsError> {
    require(df, &[TICKER, YEAR, value])?;
    let out = df
        .clone()
        .lazy()
        .filter(col(YEAR).is_not_null().and(col(TICKER).is_not_null()))
        .group_by([col(TICKER), col(YEAR)])
        .agg(aggs)
        .sort([TICKER, YEAR], SortMultipleOptions::default())
        .collect()?;
    debug!(value, rows = out.height(), "aggregated yearly");
    Ok(out)
}

/// Yearly mean, max and min price per ticker.
///
/// # Arguments
/// * `df` - Normalized daily price table with Ticker, Year and Price
///
/// # Returns
/// One row per (Ticker, Year) with `Avg_Price`, `Max_Price` and `Min_Price`.
/// A group whose prices are all null yields nulls, not zeros.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if a required column is absent.
pub fn yearly_price_stats(df: &DataFrame) -> Result<DataFrame, UtilsError> {
    group_yearly(
        df,
        PRICE,
        vec![
            col(PRICE).mean().alias(AVG_PRICE),
            col(PRICE).max().alias(MAX_PRICE),
            col(PRICE).min().alias(MIN_PRICE),
        ],
    )
}

/// Yearly mean of a daily value per ticker, named `alias`.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if a required column is absent.
pub fn yearly_mean(df: &DataFrame, value: &str, alias: &str) -> Result<DataFrame, UtilsError> {
    group_yearly(df, value, vec![col(value).mean().alias(alias)])
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use healthboard_primitives::columns::{AVG_MARKET_CAP, MARKET_CAP};

    use super::*;

    fn prices() -> DataFrame {
        df! {
            TICKER => &["VNM", "VNM", "VNM", "VNM", "FPT", "FPT"],
            YEAR => &[Some(2023), Some(2023), Some(2024), None, Some(2024), Some(2024)],
            PRICE => &[Some(10.0), Some(20.0), Some(5.0), Some(1000.0), None, None],
        }
        .unwrap()
    }

    fn row(df: &DataFrame, ticker: &str, year: i32) -> DataFrame {
        df.clone()
            .lazy()
            .filter(col(TICKER).eq(lit(ticker)).and(col(YEAR).eq(lit(year))))
            .collect()
            .unwrap()
    }

    #[test]
    fn one_row_per_ticker_year() {
        let out = yearly_price_stats(&prices()).unwrap();
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn average_is_mean_of_non_null_prices() {
        let out = yearly_price_stats(&prices()).unwrap();
        let vnm = row(&out, "VNM", 2023);
        assert_relative_eq!(vnm.column(AVG_PRICE).unwrap().f64().unwrap().get(0).unwrap(), 15.0);
        assert_relative_eq!(vnm.column(MAX_PRICE).unwrap().f64().unwrap().get(0).unwrap(), 20.0);
        assert_relative_eq!(vnm.column(MIN_PRICE).unwrap().f64().unwrap().get(0).unwrap(), 10.0);
    }

    #[test]
    fn null_year_rows_are_excluded() {
        let out = yearly_price_stats(&prices()).unwrap();
        let vnm = row(&out, "VNM", 2024);
        assert_relative_eq!(vnm.column(AVG_PRICE).unwrap().f64().unwrap().get(0).unwrap(), 5.0);
    }

    #[test]
    fn all_null_group_is_null() {
        let out = yearly_price_stats(&prices()).unwrap();
        let fpt = row(&out, "FPT", 2024);
        assert_eq!(fpt.column(AVG_PRICE).unwrap().f64().unwrap().get(0), None);
        assert_eq!(fpt.column(MAX_PRICE).unwrap().f64().unwrap().get(0), None);
    }

    #[test]
    fn yearly_mean_names_output() {
        let caps = df! {
            TICKER => &["VNM", "VNM"],
            YEAR => &[2024, 2024],
            MARKET_CAP => &[1e12, 3e12],
        }
        .unwrap();
        let out = yearly_mean(&caps, MARKET_CAP, AVG_MARKET_CAP).unwrap();
        assert_relative_eq!(out.column(AVG_MARKET_CAP).unwrap().f64().unwrap().get(0).unwrap(), 2e12);
    }

    #[test]
    fn missing_value_column_is_reported() {
        let err = yearly_mean(&prices(), MARKET_CAP, AVG_MARKET_CAP).unwrap_err();
        assert!(err.is_missing_column());
    }
}
