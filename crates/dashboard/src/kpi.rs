//! Headline KPIs over a filtered subset.
//!
//! The subset is always the denominator. Counts, shares and totals fall back
//! to zero when nothing is available; price figures report `None` instead.

use std::collections::HashSet;

use healthboard_math::{max, mean, min, percentage, sum};
use healthboard_primitives::{
    columns::{
        AVG_MARKET_CAP, AVG_PRICE, BUY_NET_FLAG, CREDIT_RATING, HEALTH_SCORE, MAX_PRICE, MIN_PRICE,
        TICKER,
    },
    is_investment_grade,
};
use healthboard_traits::Metric;
use polars::prelude::*;
use serde::Serialize;

use crate::{
    KpiConfig,
    frame::{f64_values, i32_values, str_values},
};

/// Number of distinct tickers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickerCount;

impl Metric for TickerCount {
    fn name(&self) -> &str {
        "ticker_count"
    }

    fn required_columns(&self) -> &[&str] {
        &[TICKER]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        let tickers = str_values(df, TICKER)?;
        let distinct: HashSet<&str> = tickers.iter().flatten().map(String::as_str).collect();
        Ok(Some(distinct.len() as f64))
    }
}

/// Mean health score, 0 when no score is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvgHealthScore;

impl Metric for AvgHealthScore {
    fn name(&self) -> &str {
        "avg_health_score"
    }

    fn required_columns(&self) -> &[&str] {
        &[HEALTH_SCORE]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        Ok(Some(mean(f64_values(df, HEALTH_SCORE)?).unwrap_or(0.0)))
    }
}

/// Percentage of rows rated investment grade.
///
/// Unrated rows count against the share.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvestmentGradeShare;

impl Metric for InvestmentGradeShare {
    fn name(&self) -> &str {
        "investment_grade_pct"
    }

    fn required_columns(&self) -> &[&str] {
        &[CREDIT_RATING]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        let ratings = str_values(df, CREDIT_RATING)?;
        let share = percentage(ratings.iter().map(|r| r.as_deref().is_some_and(is_investment_grade)));
        Ok(Some(share.unwrap_or(0.0)))
    }
}

/// Percentage of net-buy rows among rows carrying a flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetBuyShare;

impl Metric for NetBuyShare {
    fn name(&self) -> &str {
        "net_buy_pct"
    }

    fn required_columns(&self) -> &[&str] {
        &[BUY_NET_FLAG]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        let flags = i32_values(df, BUY_NET_FLAG)?;
        Ok(Some(percentage(flags.into_iter().flatten().map(|f| f == 1)).unwrap_or(0.0)))
    }
}

/// Summed yearly mean market capitalization, scaled for display.
#[derive(Debug, Clone, Copy)]
pub struct MarketCapTotal {
    divisor: f64,
}

impl MarketCapTotal {
    /// Create the metric with a display divisor.
    #[must_use]
    pub const fn new(divisor: f64) -> Self {
        Self { divisor }
    }
}

impl Default for MarketCapTotal {
    fn default() -> Self {
        Self::new(KpiConfig::default().market_cap_divisor)
    }
}

impl Metric for MarketCapTotal {
    fn name(&self) -> &str {
        "market_cap_total"
    }

    fn required_columns(&self) -> &[&str] {
        &[AVG_MARKET_CAP]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        Ok(Some(sum(f64_values(df, AVG_MARKET_CAP)?) / self.divisor))
    }
}

/// Mean of the yearly average prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvgPrice;

impl Metric for AvgPrice {
    fn name(&self) -> &str {
        "avg_price"
    }

    fn required_columns(&self) -> &[&str] {
        &[AVG_PRICE]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        Ok(mean(f64_values(df, AVG_PRICE)?))
    }
}

/// Highest yearly maximum price.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxPrice;

impl Metric for MaxPrice {
    fn name(&self) -> &str {
        "max_price"
    }

    fn required_columns(&self) -> &[&str] {
        &[MAX_PRICE]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        Ok(max(f64_values(df, MAX_PRICE)?))
    }
}

/// Lowest yearly minimum price.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinPrice;

impl Metric for MinPrice {
    fn name(&self) -> &str {
        "min_price"
    }

    fn required_columns(&self) -> &[&str] {
        &[MIN_PRICE]
    }

    fn compute(&self, df: &DataFrame) -> PolarsResult<Option<f64>> {
        Ok(min(f64_values(df, MIN_PRICE)?))
    }
}

/// Every headline KPI of a subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketKpis {
    /// Distinct tickers.
    pub ticker_count: usize,
    /// Mean health score.
    pub avg_health_score: f64,
    /// Investment-grade share, in percent.
    pub investment_grade_pct: f64,
    /// Net-buy share, in percent.
    pub net_buy_pct: f64,
    /// Market capitalization total, divided by the display divisor.
    pub market_cap_total: f64,
    /// Mean of yearly average prices.
    pub avg_price: Option<f64>,
    /// Highest yearly maximum price.
    pub max_price: Option<f64>,
    /// Lowest yearly minimum price.
    pub min_price: Option<f64>,
}

impl MarketKpis {
    /// Evaluate every KPI over `subset`.
    ///
    /// # Errors
    /// Returns `PolarsError` if a column has an unexpected type.
    pub fn compute(subset: &DataFrame, config: &KpiConfig) -> PolarsResult<Self> {
        let zero = |v: Option<f64>| v.unwrap_or(0.0);
        Ok(Self {
            ticker_count: zero(TickerCount.compute(subset)?) as usize,
            avg_health_score: zero(AvgHealthScore.compute(subset)?),
            investment_grade_pct: zero(InvestmentGradeShare.compute(subset)?),
            net_buy_pct: zero(NetBuyShare.compute(subset)?),
            market_cap_total: zero(MarketCapTotal::new(config.market_cap_divisor).compute(subset)?),
            avg_price: AvgPrice.compute(subset)?,
            max_price: MaxPrice.compute(subset)?,
            min_price: MinPrice.compute(subset)?,
        })
    }
}
