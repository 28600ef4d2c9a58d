//! Per (Ticker, Year) view of the fundamentals used by the assessment rules.

use serde::{Deserialize, Serialize};

use crate::{columns, is_investment_grade};

/// Z-scores of the ratios listed in [`columns::Z_SCORED`], in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZScores([Option<f64>; 9]);

impl ZScores {
    /// Z-score of a ratio, `None` if the ratio carries no Z-score or it is missing.
    #[must_use]
    pub fn get(&self, ratio: &str) -> Option<f64> {
        columns::Z_SCORED.iter().position(|&r| r == ratio).and_then(|i| self.0[i])
    }

    /// Set the Z-score of a ratio. Ratios without a Z-score column are ignored.
    pub fn set(&mut self, ratio: &str, value: Option<f64>) {
        if let Some(i) = columns::Z_SCORED.iter().position(|&r| r == ratio) {
            self.0[i] = value;
        }
    }

    /// Iterate over `(ratio, z)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        columns::Z_SCORED.iter().copied().zip(self.0.iter().copied())
    }
}

/// Numeric and categorical fields of one fundamentals row.
///
/// Every field is optional: a column that is absent from the source table or
/// a null cell both surface as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    /// Composite 0-100 health score.
    pub health_score: Option<f64>,
    /// Credit rating category.
    pub credit_rating: Option<String>,
    /// Yearly net-buy flag (1 buy, 0 sell).
    pub buy_net_flag: Option<i32>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Cash ratio.
    pub cash_ratio: Option<f64>,
    /// Interest coverage.
    pub interest_coverage: Option<f64>,
    /// Debt to asset.
    pub debt_to_asset: Option<f64>,
    /// Equity ratio.
    pub equity_ratio: Option<f64>,
    /// Return on assets.
    pub roa: Option<f64>,
    /// Return on equity.
    pub roe: Option<f64>,
    /// Net profit margin.
    pub net_profit_margin: Option<f64>,
    /// Operating profit margin.
    pub operating_profit_margin: Option<f64>,
    /// Total asset turnover.
    pub total_asset_turnover: Option<f64>,
    /// Revenue growth.
    pub revenue_growth: Option<f64>,
    /// Net income growth.
    pub net_income_growth: Option<f64>,
    /// Asset growth.
    pub asset_growth: Option<f64>,
    /// Composite health Z-score.
    pub health_z: Option<f64>,
    /// Per-ratio Z-scores.
    pub z_scores: ZScores,
}

impl FundamentalSnapshot {
    fn ratio_slot(&mut self, ratio: &str) -> Option<&mut Option<f64>> {
        let slot = match ratio {
            columns::CURRENT_RATIO => &mut self.current_ratio,
            columns::CASH_RATIO => &mut self.cash_ratio,
            columns::INTEREST_COVERAGE => &mut self.interest_coverage,
            columns::DEBT_TO_ASSET => &mut self.debt_to_asset,
            columns::EQUITY_RATIO => &mut self.equity_ratio,
            columns::ROA => &mut self.roa,
            columns::ROE => &mut self.roe,
            columns::NET_PROFIT_MARGIN => &mut self.net_profit_margin,
            columns::OPERATING_PROFIT_MARGIN => &mut self.operating_profit_margin,
            columns::TOTAL_ASSET_TURNOVER => &mut self.total_asset_turnover,
            columns::REVENUE_GROWTH => &mut self.revenue_growth,
            columns::NET_INCOME_GROWTH => &mut self.net_income_growth,
            columns::ASSET_GROWTH => &mut self.asset_growth,
            _ => return None,
        };
        Some(slot)
    }

    /// Value of a raw ratio by its column name.
    #[must_use]
    pub fn ratio(&self, ratio: &str) -> Option<f64> {
        match ratio {
            columns::CURRENT_RATIO => self.current_ratio,
            columns::CASH_RATIO => self.cash_ratio,
            columns::INTEREST_COVERAGE => self.interest_coverage,
            columns::DEBT_TO_ASSET => self.debt_to_asset,
            columns::EQUITY_RATIO => self.equity_ratio,
            columns::ROA => self.roa,
            columns::ROE => self.roe,
            columns::NET_PROFIT_MARGIN => self.net_profit_margin,
            columns::OPERATING_PROFIT_MARGIN => self.operating_profit_margin,
            columns::TOTAL_ASSET_TURNOVER => self.total_asset_turnover,
            columns::REVENUE_GROWTH => self.revenue_growth,
            columns::NET_INCOME_GROWTH => self.net_income_growth,
            columns::ASSET_GROWTH => self.asset_growth,
            _ => None,
        }
    }

    /// Set a raw ratio by its column name; unknown names are ignored.
    #[must_use]
    pub fn with_ratio(mut self, ratio: &str, value: Option<f64>) -> Self {
        if let Some(slot) = self.ratio_slot(ratio) {
            *slot = value;
        }
        self
    }

    /// Whether the rating is one of the investment-grade categories.
    #[must_use]
    pub fn has_investment_grade(&self) -> bool {
        self.credit_rating.as_deref().is_some_and(is_investment_grade)
    }
}
