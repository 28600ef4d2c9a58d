//! Schema normalization of raw source tables.

use std::collections::HashSet;

use healthboard_primitives::columns::{self, DATE, TICKER, YEAR};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::{UtilsError, epoch_days, parse_date};

/// Raw header spellings and their canonical names.
///
/// Headers are matched after trimming and case folding.
pub const RENAMES: &[(&str, &str)] = &[
    ("mã", TICKER),
    ("mã ck", TICKER),
    ("code", TICKER),
    ("ticker", TICKER),
    ("symbol", TICKER),
    ("năm", YEAR),
    ("year", YEAR),
    ("ngày", DATE),
    ("date", DATE),
    ("giá", columns::PRICE),
    ("giá đóng cửa", columns::PRICE),
    ("price", columns::PRICE),
    ("close", columns::PRICE),
    ("khối lượng", columns::VOLUME),
    ("volume", columns::VOLUME),
    ("vốn hóa", columns::MARKET_CAP),
    ("market cap", columns::MARKET_CAP),
    ("market_cap", columns::MARKET_CAP),
    ("marketcap", columns::MARKET_CAP),
    ("ngành", columns::INDUSTRY),
    ("industry", columns::INDUSTRY),
    ("sector", columns::INDUSTRY),
    ("tên công ty", columns::COMPANY),
    ("company", columns::COMPANY),
];

const TEXT: [&str; 5] =
    [TICKER, columns::COMPANY, columns::INDUSTRY, columns::CREDIT_RATING, columns::HEALTH_LABEL];

const INTEGER: [&str; 3] = [YEAR, columns::BUY_NET_FLAG, columns::HEALTH_GROUP];

const FLOAT: [&str; 14] = [
    columns::PRICE,
    columns::VOLUME,
    columns::MARKET_CAP,
    columns::HEALTH_SCORE,
    columns::HEALTH_Z,
    columns::TOTAL_NET_FLOW,
    columns::NET_FLOW,
    columns::AVG_PRICE,
    columns::MAX_PRICE,
    columns::MIN_PRICE,
    columns::AVG_MARKET_CAP,
    columns::AVG_VOLUME,
    columns::MA_SHORT,
    columns::MA_LONG,
];

fn target_type(name: &str) -> Option<DataType> {
    if TEXT.contains(&name) {
        Some(DataType::String)
    } else if INTEGER.contains(&name) {
        Some(DataType::Int32)
    } else if FLOAT.contains(&name)
        || columns::RATIOS.contains(&name)
        || name.ends_with(columns::Z_SUFFIX)
    {
        Some(DataType::Float64)
    } else {
        None
    }
}

/// Renames headers and coerces column types onto the canonical schema.
#[derive(Debug, Clone)]
pub struct Normalizer {
    renames: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            renames: RENAMES.iter().map(|(from, to)| (from.to_lowercase(), (*to).to_string())).collect(),
        }
    }
}

impl Normalizer {
    /// Create a normalizer with the default rename table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rename; it takes precedence over the defaults.
    #[must_use]
    pub fn with_rename(mut self, from: &str, to: &str) -> Self {
        self.renames.insert(0, (from.trim().to_lowercase(), to.to_string()));
        self
    }

    /// Canonical name of a raw header, or the trimmed header if unknown.
    #[must_use]
    pub fn canonical_name(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let key = trimmed.to_lowercase();
        self.renames
            .iter()
            .find(|(from, _)| *from == key)
            .map_or_else(|| trimmed.to_string(), |(_, to)| to.clone())
    }

    /// Normalize a raw table.
    ///
    /// The input is left untouched. Normalizing an already normalized table
    /// returns an equal table.
    ///
    /// # Errors
    /// Returns `UtilsError::Polars` if a column cannot be rebuilt.
    pub fn normalize(&self, df: &DataFrame) -> Result<DataFrame, UtilsError> {
        let mut out = df.clone();
        self.rename_headers(&mut out)?;
        parse_date_column(&mut out)?;
        let mut out = derive_year(out)?;
        cast_columns(&mut out)?;
        Ok(out)
    }

    fn rename_headers(&self, df: &mut DataFrame) -> PolarsResult<()> {
        let raw: Vec<String> = df.get_column_names().into_iter().map(ToString::to_string).collect();
        let canonical: Vec<String> = raw.iter().map(|n| self.canonical_name(n)).collect();

        // Headers that are already canonical keep their name.
        let mut used: HashSet<&str> =
            raw.iter().zip(&canonical).filter(|(r, c)| r == c).map(|(r, _)| r.as_str()).collect();

        let mut names = Vec::with_capacity(raw.len());
        for (r, c) in raw.iter().zip(&canonical) {
            if r == c {
                names.push(r.clone());
                continue;
            }
            let chosen = [c.as_str(), r.trim(), r.as_str()]
                .into_iter()
                .find(|n| !used.contains(n))
                .unwrap_or(r.as_str());
            if chosen == c.as_str() {
                debug!(from = %r, to = %c, "renamed column");
            } else {
                warn!(column = %r, target = %c, "rename would duplicate a column, keeping header");
            }
            used.insert(chosen);
            names.push(chosen.to_string());
        }

        if names != raw {
            df.set_column_names(names)?;
        }
        Ok(())
    }
}

fn parse_date_column(df: &mut DataFrame) -> PolarsResult<()> {
    let Ok(column) = df.column(DATE) else {
        return Ok(());
    };
    let parsed = match column.dtype() {
        DataType::Date => return Ok(()),
        DataType::Datetime(_, _) => column.cast(&DataType::Date)?,
        _ => {
            let text = column.cast(&DataType::String)?;
            let days: Vec<Option<i32>> =
                text.str()?.into_iter().map(|v| v.and_then(parse_date).map(epoch_days)).collect();
            let failed = days.iter().filter(|d| d.is_none()).count() - text.null_count();
            if failed > 0 {
                debug!(failed, "unparseable dates set to null");
            }
            Column::new(DATE.into(), days).cast(&DataType::Date)?
        }
    };
    df.with_column(parsed)?;
    Ok(())
}

fn derive_year(df: DataFrame) -> PolarsResult<DataFrame> {
    if df.column(DATE).is_err() {
        return Ok(df);
    }
    df.lazy().with_column(col(DATE).dt().year().alias(YEAR)).collect()
}

fn cast_columns(df: &mut DataFrame) -> PolarsResult<()> {
    let mut rebuilt = Vec::new();
    for column in df.get_columns() {
        let Some(target) = target_type(column.name()) else {
            continue;
        };
        let converted = match target {
            DataType::Float64 => {
                let cast = column.cast(&DataType::Float64)?;
                let scrubbed: Float64Chunked =
                    cast.f64()?.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect();
                Column::from(scrubbed.with_name(column.name().clone()).into_series())
            }
            DataType::String => {
                let cast = column.cast(&DataType::String)?;
                // Tickers share the upper-cased form of `Ticker::new`.
                let trimmed: StringChunked = if column.name().as_str() == TICKER {
                    cast.str()?.into_iter().map(|v| v.map(|s| s.trim().to_uppercase())).collect()
                } else {
                    cast.str()?.into_iter().map(|v| v.map(str::trim)).collect()
                };
                Column::from(trimmed.with_name(column.name().clone()).into_series())
            }
            other => column.cast(&other)?,
        };
        rebuilt.push(converted);
    }
    for column in rebuilt {
        df.with_column(column)?;
    }
    Ok(())
}

/// Normalize with the default rename table.
///
/// # Errors
/// Returns `UtilsError::Polars` if a column cannot be rebuilt.
pub fn normalize(df: &DataFrame) -> Result<DataFrame, UtilsError> {
    Normalizer::default().normalize(df)
}

/// Presence check of expected columns.
///
/// Missing columns are reported rather than treated as errors so callers can
/// mark the dependent computations unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    /// Expected columns found in the table.
    pub present: Vec<String>,
    /// Expected columns absent from the table.
    pub missing: Vec<String>,
}

impl ColumnReport {
    /// Check a table against a list of expected columns.
    #[must_use]
    pub fn check(df: &DataFrame, expected: &[&str]) -> Self {
        let (present, missing): (Vec<&str>, Vec<&str>) =
            expected.iter().partition(|c| df.column(c).is_ok());
        Self {
            present: present.into_iter().map(String::from).collect(),
            missing: missing.into_iter().map(String::from).collect(),
        }
    }

    /// Whether every expected column is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Whether a column was found.
    #[must_use]
    pub fn has(&self, column: &str) -> bool {
        self.present.iter().any(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use healthboard_primitives::columns::{HEALTH_GROUP, INDUSTRY, PRICE, ROA};

    use super::*;

    fn raw_prices() -> DataFrame {
        df! {
            " Mã " => &["VNM", "VNM", "FPT"],
            "Ngày" => &["2023-01-03", "garbage", "04/01/2024"],
            "Giá" => &["71.5", "72", "n/a"],
            "Ghi chú" => &["x", "y", "z"],
        }
        .unwrap()
    }

    #[test]
    fn renames_and_keeps_unknown() {
        let out = normalize(&raw_prices()).unwrap();
        let names: Vec<String> = out.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec![TICKER, DATE, PRICE, "Ghi chú", YEAR]);
    }

    #[test]
    fn parses_dates_and_years() {
        let out = normalize(&raw_prices()).unwrap();
        assert_eq!(out.column(DATE).unwrap().dtype(), &DataType::Date);
        assert_eq!(out.column(DATE).unwrap().null_count(), 1);
        let years: Vec<Option<i32>> = out.column(YEAR).unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(years, vec![Some(2023), None, Some(2024)]);
    }

    #[test]
    fn unparseable_numbers_become_null() {
        let out = normalize(&raw_prices()).unwrap();
        let prices: Vec<Option<f64>> = out.column(PRICE).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(prices, vec![Some(71.5), Some(72.0), None]);
    }

    #[test]
    fn nan_becomes_null_and_flags_are_integers() {
        let df = df! {
            "code" => &["AAA"],
            "year" => &[2024.0],
            "ROA" => &[f64::NAN],
            "Health_Group" => &[2.0],
            "Ngành" => &[" Banks "],
        }
        .unwrap();
        let out = normalize(&df).unwrap();
        assert_eq!(out.column(ROA).unwrap().null_count(), 1);
        assert_eq!(out.column(YEAR).unwrap().dtype(), &DataType::Int32);
        assert_eq!(out.column(HEALTH_GROUP).unwrap().i32().unwrap().get(0), Some(2));
        assert_eq!(out.column(INDUSTRY).unwrap().str().unwrap().get(0), Some("Banks"));
    }

    #[test]
    fn tickers_are_upper_cased() {
        let df = df! { "code" => &[" vnm", "Fpt "], "Ngành" => &["banks", "Tech"] }.unwrap();
        let out = normalize(&df).unwrap();
        let tickers: Vec<Option<&str>> = out.column(TICKER).unwrap().str().unwrap().into_iter().collect();
        assert_eq!(tickers, vec![Some("VNM"), Some("FPT")]);
        assert_eq!(out.column(INDUSTRY).unwrap().str().unwrap().get(0), Some("banks"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize(&raw_prices()).unwrap();
        let twice = normalize(&once).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn input_is_not_mutated() {
        let raw = raw_prices();
        let _ = normalize(&raw).unwrap();
        assert!(raw.column(" Mã ").is_ok());
    }

    #[test]
    fn renames_never_collide() {
        let df = df! {
            "Ticker" => &["AAA"],
            "code" => &["BBB"],
        }
        .unwrap();
        let out = normalize(&df).unwrap();
        assert_eq!(out.column(TICKER).unwrap().str().unwrap().get(0), Some("AAA"));
        assert!(out.column("code").is_ok());
    }

    #[test]
    fn custom_rename_takes_precedence() {
        let normalizer = Normalizer::new().with_rename("Giá", "Close_Price");
        assert_eq!(normalizer.canonical_name(" giá "), "Close_Price");
        assert_eq!(normalizer.canonical_name("unknown "), "unknown");
    }

    #[test]
    fn column_report() {
        let out = normalize(&raw_prices()).unwrap();
        let report = ColumnReport::check(&out, &[TICKER, PRICE, "Volume"]);
        assert!(!report.is_complete());
        assert!(report.has(PRICE));
        assert_eq!(report.missing, vec!["Volume".to_string()]);
    }
}
