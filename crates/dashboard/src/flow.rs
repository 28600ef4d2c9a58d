//! Foreign investor flow analysis.

use std::fmt;

use healthboard_math::{TrailingMean, mean, tail_mean};
use healthboard_primitives::{
    FlowPoint, Ticker, Year,
    columns::{DATE, MA_LONG, MA_SHORT, NET_FLOW, TICKER, TOTAL_NET_FLOW, YEAR},
};
use healthboard_utils::ColumnReport;
use ndarray::Array1;
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    DashboardError, FlowConfig,
    frame::{date_values, f64_values, i32_values},
};

/// Direction of the recent daily flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTrend {
    /// Recent mean above zero.
    Positive,
    /// Recent mean at or below zero.
    Negative,
}

impl FlowTrend {
    /// Classify a mean net flow.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        if mean > 0.0 { Self::Positive } else { Self::Negative }
    }
}

impl fmt::Display for FlowTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        })
    }
}

/// Daily flow of one ticker over one year with trailing averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowAnalysis {
    /// Analyzed ticker.
    pub ticker: Ticker,
    /// Analyzed year.
    pub year: Year,
    /// Observations in date order.
    pub points: Vec<FlowPoint>,
    /// Trailing observations the trend is read from.
    pub trend_window: usize,
    /// Mean of the trailing observations.
    pub recent_mean: Option<f64>,
    /// Trend read from `recent_mean`.
    pub trend: Option<FlowTrend>,
}

impl FlowAnalysis {
    fn empty(ticker: &Ticker, year: Year, trend_window: usize) -> Self {
        Self {
            ticker: ticker.clone(),
            year,
            points: Vec::new(),
            trend_window,
            recent_mean: None,
            trend: None,
        }
    }

    /// Whether no usable observation exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// One-sentence reading of the trend.
    #[must_use]
    pub fn narrative(&self) -> String {
        match (self.trend, self.recent_mean) {
            (Some(trend), Some(recent)) => format!(
                "Foreign flow for {} in {} is {trend}: mean net flow {recent:.2} over the last {} sessions.",
                self.ticker,
                self.year,
                self.points.len().min(self.trend_window)
            ),
            _ => format!("No daily flow data for {} in {}.", self.ticker, self.year),
        }
    }
}

/// Analyze the daily flow of `ticker` during `year`.
///
/// Rows with a missing date or flow value are dropped before the averages are
/// computed; the remaining rows are not re-gridded. A table without the needed
/// columns, or without matching rows, yields an empty analysis.
///
/// # Arguments
/// * `daily` - Normalized daily flow table
/// * `ticker` - Ticker to analyze
/// * `year` - Calendar year of the dates to keep
/// * `config` - Window sizes
///
/// # Errors
/// Returns `DashboardError::Math` for a zero window and
/// `DashboardError::Polars` if a column has an unexpected type.
pub fn analyze_daily_flow(
    daily: &DataFrame,
    ticker: &Ticker,
    year: Year,
    config: &FlowConfig,
) -> Result<FlowAnalysis, DashboardError> {
    let short = TrailingMean::new(config.short_window)?;
    let long = TrailingMean::new(config.long_window)?;

    let report = ColumnReport::check(daily, &[TICKER, DATE, NET_FLOW]);
    if !report.is_complete() {
        warn!(missing = ?report.missing, "daily flow table incomplete, analysis unavailable");
        return Ok(FlowAnalysis::empty(ticker, year, config.trend_window));
    }

    let rows = daily
        .clone()
        .lazy()
        .with_column(col(NET_FLOW).cast(DataType::Float64))
        .filter(
            col(TICKER)
                .eq(lit(ticker.as_str()))
                .and(col(DATE).is_not_null())
                .and(col(DATE).dt().year().eq(lit(year)))
                .and(col(NET_FLOW).is_not_null())
                .and(col(NET_FLOW).is_not_nan()),
        )
        .sort([DATE], SortMultipleOptions::default().with_maintain_order(true))
        .with_columns([short.expr(NET_FLOW).alias(MA_SHORT), long.expr(NET_FLOW).alias(MA_LONG)])
        .collect()?;

    let dates = date_values(&rows, DATE)?;
    let flows = f64_values(&rows, NET_FLOW)?;
    let ma_short = f64_values(&rows, MA_SHORT)?;
    let ma_long = f64_values(&rows, MA_LONG)?;

    let points: Vec<FlowPoint> = dates
        .into_iter()
        .zip(flows)
        .zip(ma_short.into_iter().zip(ma_long))
        .filter_map(|((date, flow), (ma_short, ma_long))| {
            Some(FlowPoint { date: date?, net_flow: flow?, ma_short, ma_long })
        })
        .collect();

    let series: Array1<f64> = points.iter().map(|p| p.net_flow).collect();
    let recent_mean = tail_mean(&series, config.trend_window);
    debug!(%ticker, year, points = points.len(), ?recent_mean, "analyzed daily flow");

    Ok(FlowAnalysis {
        ticker: ticker.clone(),
        year,
        points,
        trend_window: config.trend_window,
        recent_mean,
        trend: recent_mean.map(FlowTrend::from_mean),
    })
}

/// Long-run direction of the yearly flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStance {
    /// Mean yearly net flow above zero.
    Accumulating,
    /// Mean yearly net flow at or below zero.
    Withdrawing,
}

impl FlowStance {
    /// Classify a mean yearly net flow.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        if mean > 0.0 { Self::Accumulating } else { Self::Withdrawing }
    }
}

impl fmt::Display for FlowStance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accumulating => "accumulating",
            Self::Withdrawing => "withdrawing",
        })
    }
}

/// Net flow of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyFlowPoint {
    /// Calendar year.
    pub year: Year,
    /// Total foreign net flow, `None` when unknown.
    pub net_flow: Option<f64>,
}

/// Yearly flow series of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyFlow {
    /// Ticker of the series.
    pub ticker: Ticker,
    /// Points sorted by year.
    pub points: Vec<YearlyFlowPoint>,
    /// Mean of the known yearly flows.
    pub mean: Option<f64>,
    /// Stance read from `mean`.
    pub stance: Option<FlowStance>,
}

impl YearlyFlow {
    /// One-sentence reading of the stance.
    #[must_use]
    pub fn narrative(&self) -> String {
        let first = self.points.first().map(|p| p.year);
        let last = self.points.last().map(|p| p.year);
        match (self.stance, self.mean, first, last) {
            (Some(stance), Some(mean), Some(first), Some(last)) => format!(
                "Foreign investors are {stance} in {} over {first}-{last}, mean yearly net flow {mean:.0}.",
                self.ticker
            ),
            _ => format!("No yearly flow data for {}.", self.ticker),
        }
    }
}

/// Yearly net flow series of `ticker`, sorted by year.
///
/// # Errors
/// Returns `DashboardError::Polars` if a column has an unexpected type.
pub fn yearly_flow(flows: &DataFrame, ticker: &Ticker) -> Result<YearlyFlow, DashboardError> {
    let report = ColumnReport::check(flows, &[TICKER, YEAR, TOTAL_NET_FLOW]);
    if !report.is_complete() {
        warn!(missing = ?report.missing, "yearly flow table incomplete, series unavailable");
        return Ok(YearlyFlow { ticker: ticker.clone(), points: Vec::new(), mean: None, stance: None });
    }

    let rows = flows
        .clone()
        .lazy()
        .filter(col(TICKER).eq(lit(ticker.as_str())).and(col(YEAR).is_not_null()))
        .sort([YEAR], SortMultipleOptions::default().with_maintain_order(true))
        .collect()?;

    let points: Vec<YearlyFlowPoint> = i32_values(&rows, YEAR)?
        .into_iter()
        .zip(f64_values(&rows, TOTAL_NET_FLOW)?)
        .filter_map(|(year, net_flow)| Some(YearlyFlowPoint { year: year?, net_flow }))
        .collect();
    let mean = mean(points.iter().map(|p| p.net_flow));

    Ok(YearlyFlow { ticker: ticker.clone(), points, mean, stance: mean.map(FlowStance::from_mean) })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use healthboard_primitives::Date;

    use super::*;

    fn daily(n: usize) -> DataFrame {
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let mut dates: Vec<Date> = start.iter_days().take(n).collect();
        dates.reverse();
        let flows: Vec<Option<f64>> = (0..n).rev().map(|i| Some(i as f64 + 1.0)).collect();
        df! {
            TICKER => vec!["VNM"; n],
            DATE => dates,
            NET_FLOW => flows,
        }
        .unwrap()
    }

    #[test]
    fn moving_averages_use_partial_windows() {
        let analysis =
            analyze_daily_flow(&daily(40), &Ticker::new("vnm"), 2024, &FlowConfig::default()).unwrap();
        assert_eq!(analysis.points.len(), 40);
        let first = analysis.points[0];
        assert_relative_eq!(first.net_flow, 1.0);
        assert_eq!(first.ma_short, Some(1.0));
        // Observations are 1..=40 in date order.
        assert_relative_eq!(analysis.points[24].ma_short.unwrap(), (6..=25).sum::<i32>() as f64 / 20.0);
        assert_relative_eq!(analysis.points[9].ma_long.unwrap(), 5.5);
        assert_relative_eq!(analysis.recent_mean.unwrap(), (11..=40).sum::<i32>() as f64 / 30.0);
        assert_eq!(analysis.trend, Some(FlowTrend::Positive));
    }

    #[test]
    fn short_history_uses_every_observation() {
        let mut df = daily(3);
        let negative = Column::new(NET_FLOW.into(), [-5.0, 1.0, 1.0]);
        df.with_column(negative).unwrap();
        let analysis =
            analyze_daily_flow(&df, &Ticker::new("VNM"), 2024, &FlowConfig::default()).unwrap();
        assert_relative_eq!(analysis.recent_mean.unwrap(), -1.0);
        assert_eq!(analysis.trend, Some(FlowTrend::Negative));
        assert!(analysis.narrative().contains("negative"));
    }

    #[test]
    fn missing_values_are_dropped() {
        let df = df! {
            TICKER => &["VNM", "VNM", "VNM"],
            DATE => &[Date::from_ymd_opt(2024, 1, 2), None, Date::from_ymd_opt(2024, 1, 4)],
            NET_FLOW => &[Some(2.0), Some(100.0), None],
        }
        .unwrap();
        let analysis =
            analyze_daily_flow(&df, &Ticker::new("VNM"), 2024, &FlowConfig::default()).unwrap();
        assert_eq!(analysis.points.len(), 1);
        assert_eq!(analysis.recent_mean, Some(2.0));
    }

    #[test]
    fn non_numeric_flows_are_dropped() {
        let raw = df! {
            "Ticker" => &["vnm", "VNM", "VNM"],
            "Date" => &["02/01/2024", "03/01/2024", "04/01/2024"],
            NET_FLOW => &["1.5", "abc", "2"],
        }
        .unwrap();
        let daily = healthboard_utils::normalize(&raw).unwrap();
        let analysis =
            analyze_daily_flow(&daily, &Ticker::new("VNM"), 2024, &FlowConfig::default()).unwrap();
        let flows: Vec<f64> = analysis.points.iter().map(|p| p.net_flow).collect();
        assert_eq!(flows, vec![1.5, 2.0]);
        assert_relative_eq!(analysis.points[1].ma_short.unwrap(), 1.75);
        assert_relative_eq!(analysis.recent_mean.unwrap(), 1.75);
    }

    #[test]
    fn no_rows_is_an_empty_analysis() {
        let analysis =
            analyze_daily_flow(&daily(5), &Ticker::new("FPT"), 2024, &FlowConfig::default()).unwrap();
        assert!(analysis.is_empty());
        assert_eq!(analysis.trend, None);
        assert_eq!(analysis.narrative(), "No daily flow data for FPT in 2024.");

        let other_year =
            analyze_daily_flow(&daily(5), &Ticker::new("VNM"), 2023, &FlowConfig::default()).unwrap();
        assert!(other_year.is_empty());
    }

    #[test]
    fn incomplete_table_is_an_empty_analysis() {
        let df = df! { TICKER => &["VNM"] }.unwrap();
        let analysis =
            analyze_daily_flow(&df, &Ticker::new("VNM"), 2024, &FlowConfig::default()).unwrap();
        assert!(analysis.is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = FlowConfig { short_window: 0, ..FlowConfig::default() };
        let err = analyze_daily_flow(&daily(5), &Ticker::new("VNM"), 2024, &config).unwrap_err();
        assert!(matches!(err, DashboardError::Math(_)));
    }

    #[test]
    fn yearly_stance() {
        let flows = df! {
            TICKER => &["VNM", "VNM", "VNM", "FPT"],
            YEAR => &[2024, 2022, 2023, 2024],
            TOTAL_NET_FLOW => &[Some(-50.0), Some(100.0), None, Some(-1.0)],
        }
        .unwrap();
        let series = yearly_flow(&flows, &Ticker::new("VNM")).unwrap();
        let years: Vec<Year> = series.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2022, 2023, 2024]);
        assert_eq!(series.mean, Some(25.0));
        assert_eq!(series.stance, Some(FlowStance::Accumulating));
        assert!(series.narrative().contains("2022-2024"));

        let fpt = yearly_flow(&flows, &Ticker::new("FPT")).unwrap();
        assert_eq!(fpt.stance, Some(FlowStance::Withdrawing));

        let none = yearly_flow(&flows, &Ticker::new("HPG")).unwrap();
        assert_eq!(none.stance, None);
        assert_eq!(none.narrative(), "No yearly flow data for HPG.");
    }
}
