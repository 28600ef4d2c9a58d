//! Master table assembly.

use healthboard_primitives::columns::{INDUSTRY, KEY, TICKER, YEAR};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::UtilsError;

/// Category values that stand for "not classified".
pub const MISSING_SENTINELS: [&str; 6] = ["", "nan", "NaN", "None", "null", "NULL"];

const ROW: &str = "_row";

/// Keep the first row of every (Ticker, Year) key.
pub fn dedupe_keys(lf: LazyFrame) -> LazyFrame {
    lf.with_row_index(ROW, None)
        .filter(col(ROW).eq(col(ROW).min().over([col(TICKER), col(YEAR)])))
        .drop([ROW])
}

/// Replace missing sentinels of a text column with nulls.
///
/// The column is coerced to text first. Absent columns are left alone.
///
/// # Errors
/// Returns `UtilsError::Polars` if the column cannot be cast to text.
pub fn clean_category(df: &DataFrame, column: &str) -> Result<DataFrame, UtilsError> {
    let Ok(values) = df.column(column) else {
        return Ok(df.clone());
    };
    let text = values.cast(&DataType::String)?;
    let cleaned: StringChunked = text
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !MISSING_SENTINELS.contains(s)))
        .collect();
    let mut out = df.clone();
    out.with_column(cleaned.with_name(column.into()).into_series())?;
    Ok(out)
}

/// Left-join yearly tables onto the fundamentals anchor.
///
/// The anchor decides which (Ticker, Year) keys exist. Each right table is
/// reduced to one row per key and loses the columns the left side already
/// has, so the result holds exactly one row per anchor key and the anchor's
/// values win. Right tables without the key columns are skipped.
///
/// # Arguments
/// * `fundamentals` - Normalized anchor table
/// * `others` - Normalized yearly tables, joined in order
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if the anchor lacks a key column.
pub fn build_master(fundamentals: &DataFrame, others: &[&DataFrame]) -> Result<DataFrame, UtilsError> {
    for key in KEY {
        if fundamentals.column(key).is_err() {
            return Err(UtilsError::MissingColumn(key.to_string()));
        }
    }

    let anchor = dedupe_keys(fundamentals.clone().lazy()).collect()?;
    if anchor.height() != fundamentals.height() {
        warn!(
            dropped = fundamentals.height() - anchor.height(),
            "duplicate keys in fundamentals, keeping first"
        );
    }

    let mut master = anchor;
    for (i, right) in others.iter().enumerate() {
        if KEY.iter().any(|k| right.column(k).is_err()) {
            warn!(table = i, "joined table lacks key columns, skipping");
            continue;
        }
        let keep: Vec<Expr> = right
            .get_column_names()
            .into_iter()
            .filter(|name| KEY.contains(&name.as_str()) || master.column(name.as_str()).is_err())
            .map(|name| col(name.clone()))
            .collect();
        if keep.len() == KEY.len() {
            debug!(table = i, "joined table adds no columns");
        }
        let right = dedupe_keys((*right).clone().lazy().select(keep));
        master = master
            .lazy()
            .join(
                right,
                [col(TICKER), col(YEAR)],
                [col(TICKER), col(YEAR)],
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;
    }

    let master = master
        .lazy()
        .sort([TICKER, YEAR], SortMultipleOptions::default().with_maintain_order(true))
        .collect()?;
    let master = clean_category(&master, INDUSTRY)?;
    debug!(rows = master.height(), columns = master.width(), "built master table");
    Ok(master)
}
