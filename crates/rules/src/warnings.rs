//! Independent risk warnings.

use std::fmt;

use healthboard_primitives::FundamentalSnapshot;
use serde::Serialize;

use crate::table::{Rule, above, below};

/// A threshold breach worth flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskWarning {
    /// Debt to asset above 0.6.
    HighLeverage,
    /// Net income shrinking.
    FallingProfit,
    /// Current ratio below 1.0.
    WeakLiquidity,
    /// Negative ROA or ROE.
    LossMaking,
}

impl RiskWarning {
    /// Short label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighLeverage => "high leverage",
            Self::FallingProfit => "falling profit",
            Self::WeakLiquidity => "weak liquidity",
            Self::LossMaking => "loss making",
        }
    }

    /// One-line explanation of the breached threshold.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::HighLeverage => "debt exceeds 60% of total assets",
            Self::FallingProfit => "net income declined year over year",
            Self::WeakLiquidity => "current assets do not cover current liabilities",
            Self::LossMaking => "negative return on assets or equity",
        }
    }
}

impl fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())
    }
}

fn high_leverage(s: &FundamentalSnapshot) -> bool {
    above(s.debt_to_asset, 0.6)
}

fn falling_profit(s: &FundamentalSnapshot) -> bool {
    below(s.net_income_growth, 0.0)
}

fn weak_liquidity(s: &FundamentalSnapshot) -> bool {
    below(s.current_ratio, 1.0)
}

fn loss_making(s: &FundamentalSnapshot) -> bool {
    below(s.roa, 0.0) || below(s.roe, 0.0)
}

/// Warning rules in reporting order. All of them are evaluated.
pub static WARNINGS: [Rule<FundamentalSnapshot, RiskWarning>; 4] = [
    Rule { name: "debt to asset > 0.6", predicate: high_leverage, outcome: RiskWarning::HighLeverage },
    Rule {
        name: "net income growth < 0",
        predicate: falling_profit,
        outcome: RiskWarning::FallingProfit,
    },
    Rule { name: "current ratio < 1.0", predicate: weak_liquidity, outcome: RiskWarning::WeakLiquidity },
    Rule { name: "ROA < 0 or ROE < 0", predicate: loss_making, outcome: RiskWarning::LossMaking },
];

/// Every warning whose threshold the snapshot crosses.
#[must_use]
pub fn risk_warnings(snapshot: &FundamentalSnapshot) -> Vec<RiskWarning> {
    WARNINGS.iter().filter(|rule| rule.matches(snapshot)).map(|rule| rule.outcome).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn all_applicable_warnings_in_order() {
        let s = FundamentalSnapshot {
            debt_to_asset: Some(0.65),
            net_income_growth: Some(-4.0),
            current_ratio: Some(0.8),
            roa: Some(1.0),
            roe: Some(-2.0),
            ..Default::default()
        };
        assert_eq!(
            risk_warnings(&s),
            vec![
                RiskWarning::HighLeverage,
                RiskWarning::FallingProfit,
                RiskWarning::WeakLiquidity,
                RiskWarning::LossMaking,
            ]
        );
    }

    #[rstest]
    #[case(Some(0.6), Some(0.0), Some(1.0))]
    #[case(None, None, None)]
    #[case(Some(f64::NAN), Some(f64::NAN), Some(f64::NAN))]
    fn boundaries_and_missing_do_not_warn(
        #[case] debt: Option<f64>,
        #[case] income: Option<f64>,
        #[case] current: Option<f64>,
    ) {
        let s = FundamentalSnapshot {
            debt_to_asset: debt,
            net_income_growth: income,
            current_ratio: current,
            ..Default::default()
        };
        assert!(risk_warnings(&s).is_empty());
    }

    #[test]
    fn high_leverage_alone() {
        let s = FundamentalSnapshot { debt_to_asset: Some(0.65), ..Default::default() };
        assert_eq!(risk_warnings(&s), vec![RiskWarning::HighLeverage]);
        assert!(RiskWarning::HighLeverage.to_string().starts_with("high leverage"));
    }
}
