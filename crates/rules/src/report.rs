//! Full assessment of one company-year.

use healthboard_primitives::{FundamentalSnapshot, HealthGroup};
use serde::Serialize;

use crate::{
    GROWTH, Growth, INVESTMENT, InvestmentCall, LEVERAGE, LIQUIDITY, Leverage, Liquidity,
    PROFITABILITY, Profitability, RiskWarning, Suggestion, ZScoreReading, risk_warnings,
    zscore_panel,
};

/// Every rule outcome for a snapshot, with the figures behind them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Figures the report was computed from.
    pub snapshot: FundamentalSnapshot,
    /// Health group decoded from the fundamentals, when known.
    pub group: HealthGroup,
    /// Investment call.
    pub investment: InvestmentCall,
    /// Liquidity aspect.
    pub liquidity: Liquidity,
    /// Leverage aspect.
    pub leverage: Leverage,
    /// Profitability aspect.
    pub profitability: Profitability,
    /// Growth aspect.
    pub growth: Growth,
    /// Triggered warnings, in reporting order.
    pub warnings: Vec<RiskWarning>,
    /// Top-level suggestion.
    pub suggestion: Suggestion,
    /// Available Z-scores with their bands.
    pub z_scores: Vec<ZScoreReading>,
}

impl HealthReport {
    /// Evaluate every table against a snapshot.
    #[must_use]
    pub fn assess(snapshot: &FundamentalSnapshot, group: HealthGroup) -> Self {
        Self {
            snapshot: snapshot.clone(),
            group,
            investment: INVESTMENT.evaluate(snapshot),
            liquidity: LIQUIDITY.evaluate(snapshot),
            leverage: LEVERAGE.evaluate(snapshot),
            profitability: PROFITABILITY.evaluate(snapshot),
            growth: GROWTH.evaluate(snapshot),
            warnings: risk_warnings(snapshot),
            suggestion: Suggestion::for_snapshot(snapshot),
            z_scores: zscore_panel(snapshot),
        }
    }

    /// One sentence per aspect, quoting the underlying figures.
    #[must_use]
    pub fn narrative(&self) -> Vec<String> {
        let s = &self.snapshot;
        vec![
            format!(
                "Liquidity is {}: current ratio {}, cash ratio {}.",
                self.liquidity,
                figure(s.current_ratio),
                figure(s.cash_ratio)
            ),
            format!("Leverage is {}: debt to asset {}.", self.leverage, figure(s.debt_to_asset)),
            format!(
                "Profitability is {}: ROA {}%, ROE {}%.",
                self.profitability,
                figure(s.roa),
                figure(s.roe)
            ),
            format!(
                "Growth is {}: revenue {}%, net income {}%.",
                self.growth,
                figure(s.revenue_growth),
                figure(s.net_income_growth)
            ),
        ]
    }
}

fn figure(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => "n/a".to_string(),
    }
}
