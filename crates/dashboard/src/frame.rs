//! Column readers shared by the analysis modules.
//!
//! Absent columns read as all-missing so callers degrade instead of failing.

use healthboard_primitives::Date;
use healthboard_utils::date_from_epoch_days;
use polars::prelude::*;

pub(crate) fn f64_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    let Ok(values) = df.column(column) else {
        return Ok(vec![None; df.height()]);
    };
    let cast = values.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
}

pub(crate) fn i32_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<i32>>> {
    let Ok(values) = df.column(column) else {
        return Ok(vec![None; df.height()]);
    };
    let cast = values.cast(&DataType::Int32)?;
    Ok(cast.i32()?.into_iter().collect())
}

pub(crate) fn str_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let Ok(values) = df.column(column) else {
        return Ok(vec![None; df.height()]);
    };
    let cast = values.cast(&DataType::String)?;
    Ok(cast.str()?.into_iter().map(|v| v.map(ToString::to_string)).collect())
}

pub(crate) fn date_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<Date>>> {
    let Ok(values) = df.column(column) else {
        return Ok(vec![None; df.height()]);
    };
    let days = values.cast(&DataType::Date)?.cast(&DataType::Int32)?;
    Ok(days.i32()?.into_iter().map(|d| d.and_then(date_from_epoch_days)).collect())
}

/// First value of a column, `None` for an empty frame or absent column.
pub(crate) fn first_f64(df: &DataFrame, column: &str) -> PolarsResult<Option<f64>> {
    Ok(f64_values(df, column)?.into_iter().next().flatten())
}

pub(crate) fn first_i32(df: &DataFrame, column: &str) -> PolarsResult<Option<i32>> {
    Ok(i32_values(df, column)?.into_iter().next().flatten())
}

pub(crate) fn first_str(df: &DataFrame, column: &str) -> PolarsResult<Option<String>> {
    Ok(str_values(df, column)?.into_iter().next().flatten())
}
