//! Single-company lookup.

use healthboard_primitives::{
    Date, FlowDirection, FundamentalSnapshot, HealthGroup, Ticker, Year,
    columns::{
        self, AVG_MARKET_CAP, AVG_PRICE, BUY_NET_FLAG, COMPANY, CREDIT_RATING, DATE, HEALTH_GROUP,
        HEALTH_LABEL, HEALTH_SCORE, HEALTH_Z, INDUSTRY, MAX_PRICE, MIN_PRICE, TICKER,
        TOTAL_NET_FLOW, YEAR,
    },
};
use healthboard_utils::{ColumnReport, epoch_days};
use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::{
    DashboardError,
    frame::{first_f64, first_i32, first_str},
};

/// Read the fundamentals of row `row` into a snapshot.
///
/// Absent columns and null cells both become `None`.
///
/// # Errors
/// Returns `PolarsError` if a column has an unexpected type.
pub fn snapshot_of(df: &DataFrame, row: usize) -> PolarsResult<FundamentalSnapshot> {
    let one = df.slice(row as i64, 1);
    let mut snapshot = FundamentalSnapshot {
        health_score: first_f64(&one, HEALTH_SCORE)?,
        credit_rating: first_str(&one, CREDIT_RATING)?,
        buy_net_flag: first_i32(&one, BUY_NET_FLAG)?,
        health_z: first_f64(&one, HEALTH_Z)?,
        ..Default::default()
    };
    for ratio in columns::RATIOS {
        snapshot = snapshot.with_ratio(ratio, first_f64(&one, ratio)?);
    }
    for ratio in columns::Z_SCORED {
        snapshot.z_scores.set(ratio, first_f64(&one, &columns::z_column(ratio))?);
    }
    Ok(snapshot)
}

/// The master row of (ticker, year), if any.
pub(crate) fn find_row(
    master: &DataFrame,
    ticker: &Ticker,
    year: Year,
) -> PolarsResult<Option<DataFrame>> {
    if master.column(TICKER).is_err() || master.column(YEAR).is_err() {
        return Ok(None);
    }
    let rows = master
        .clone()
        .lazy()
        .filter(col(TICKER).eq(lit(ticker.as_str())).and(col(YEAR).eq(lit(year))))
        .limit(1)
        .collect()?;
    Ok((rows.height() > 0).then_some(rows))
}

/// Card of one company in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    /// Ticker.
    pub ticker: Ticker,
    /// Year of the figures.
    pub year: Year,
    /// Company name.
    pub company: Option<String>,
    /// Industry.
    pub industry: Option<String>,
    /// Health score.
    pub health_score: Option<f64>,
    /// Health group.
    pub health_group: HealthGroup,
    /// Health label as shipped.
    pub health_label: Option<String>,
    /// Credit rating.
    pub credit_rating: Option<String>,
    /// Yearly mean price.
    pub avg_price: Option<f64>,
    /// Yearly maximum price.
    pub max_price: Option<f64>,
    /// Yearly minimum price.
    pub min_price: Option<f64>,
    /// Yearly mean market capitalization.
    pub avg_market_cap: Option<f64>,
    /// Yearly foreign net flow.
    pub total_net_flow: Option<f64>,
    /// Yearly flow direction.
    pub flow: Option<FlowDirection>,
}

impl CompanyProfile {
    /// Look up (ticker, year) in the master table.
    ///
    /// # Returns
    /// `None` when the pair is absent.
    ///
    /// # Errors
    /// Returns `PolarsError` if a column has an unexpected type.
    pub fn lookup(master: &DataFrame, ticker: &Ticker, year: Year) -> PolarsResult<Option<Self>> {
        let Some(row) = find_row(master, ticker, year)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            ticker: ticker.clone(),
            year,
            company: first_str(&row, COMPANY)?,
            industry: first_str(&row, INDUSTRY)?,
            health_score: first_f64(&row, HEALTH_SCORE)?,
            health_group: HealthGroup::from_code(first_i32(&row, HEALTH_GROUP)?),
            health_label: first_str(&row, HEALTH_LABEL)?,
            credit_rating: first_str(&row, CREDIT_RATING)?,
            avg_price: first_f64(&row, AVG_PRICE)?,
            max_price: first_f64(&row, MAX_PRICE)?,
            min_price: first_f64(&row, MIN_PRICE)?,
            avg_market_cap: first_f64(&row, AVG_MARKET_CAP)?,
            total_net_flow: first_f64(&row, TOTAL_NET_FLOW)?,
            flow: first_i32(&row, BUY_NET_FLAG)?.and_then(FlowDirection::from_flag),
        }))
    }
}

/// Rows of `ticker` dated within `[from, to]`, sorted by date.
///
/// Open bounds are unrestricted. Rows without a date are dropped.
///
/// # Arguments
/// * `table` - Normalized daily table
/// * `ticker` - Ticker to select
/// * `from` - First date, inclusive
/// * `to` - Last date, inclusive
///
/// # Errors
/// Returns `DashboardError::Polars` if the date column cannot be compared.
pub fn ticker_series(
    table: &DataFrame,
    ticker: &Ticker,
    from: Option<Date>,
    to: Option<Date>,
) -> Result<DataFrame, DashboardError> {
    let report = ColumnReport::check(table, &[TICKER, DATE]);
    if !report.is_complete() {
        warn!(missing = ?report.missing, "daily table incomplete, series unavailable");
        return Ok(table.clear());
    }

    let day = || col(DATE).cast(DataType::Int32);
    let mut predicate = col(TICKER).eq(lit(ticker.as_str())).and(col(DATE).is_not_null());
    if let Some(from) = from {
        predicate = predicate.and(day().gt_eq(lit(epoch_days(from))));
    }
    if let Some(to) = to {
        predicate = predicate.and(day().lt_eq(lit(epoch_days(to))));
    }
    Ok(table
        .clone()
        .lazy()
        .filter(predicate)
        .sort([DATE], SortMultipleOptions::default().with_maintain_order(true))
        .collect()?)
}
