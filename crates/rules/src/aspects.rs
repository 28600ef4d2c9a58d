//! Narrative aspects: liquidity, leverage, profitability and growth.

use std::fmt;

use healthboard_primitives::FundamentalSnapshot;
use serde::Serialize;

use crate::table::{DecisionTable, Rule, above, at_least, below};

macro_rules! labelled {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Human readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Short-term solvency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Liquidity {
    /// Current ratio >= 1.5 and cash ratio >= 0.3.
    Good,
    /// Current ratio >= 1.0.
    Acceptable,
    /// Anything lower.
    NeedsAttention,
}

labelled!(Liquidity { Good => "good", Acceptable => "acceptable", NeedsAttention => "needs attention" });

/// Balance sheet leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leverage {
    /// Debt to asset below 0.4.
    Safe,
    /// Debt to asset below 0.6.
    Moderate,
    /// Anything higher.
    Caution,
}

labelled!(Leverage { Safe => "safe", Moderate => "moderate", Caution => "caution" });

/// Returns on assets and equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Profitability {
    /// ROA above 5 and ROE above 10.
    Good,
    /// Both returns positive.
    Average,
    /// Anything lower.
    NeedsMonitoring,
}

labelled!(Profitability { Good => "good", Average => "average", NeedsMonitoring => "needs monitoring" });

/// Revenue and earnings growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Growth {
    /// Revenue and net income both growing.
    Growing,
    /// Revenue growing, net income not.
    RevenueOnly,
    /// Revenue not growing.
    Concerning,
}

labelled!(Growth { Growing => "growing", RevenueOnly => "revenue up, profit unclear", Concerning => "concerning" });

fn liquid(s: &FundamentalSnapshot) -> bool {
    at_least(s.current_ratio, 1.5) && at_least(s.cash_ratio, 0.3)
}

fn covers_current(s: &FundamentalSnapshot) -> bool {
    at_least(s.current_ratio, 1.0)
}

static LIQUIDITY_RULES: [Rule<FundamentalSnapshot, Liquidity>; 2] = [
    Rule { name: "current >= 1.5 and cash >= 0.3", predicate: liquid, outcome: Liquidity::Good },
    Rule { name: "current >= 1.0", predicate: covers_current, outcome: Liquidity::Acceptable },
];

/// Liquidity table.
pub static LIQUIDITY: DecisionTable<FundamentalSnapshot, Liquidity> =
    DecisionTable::new(&LIQUIDITY_RULES, Liquidity::NeedsAttention);

fn low_debt(s: &FundamentalSnapshot) -> bool {
    below(s.debt_to_asset, 0.4)
}

fn moderate_debt(s: &FundamentalSnapshot) -> bool {
    below(s.debt_to_asset, 0.6)
}

static LEVERAGE_RULES: [Rule<FundamentalSnapshot, Leverage>; 2] = [
    Rule { name: "debt to asset < 0.4", predicate: low_debt, outcome: Leverage::Safe },
    Rule { name: "debt to asset < 0.6", predicate: moderate_debt, outcome: Leverage::Moderate },
];

/// Leverage table.
pub static LEVERAGE: DecisionTable<FundamentalSnapshot, Leverage> =
    DecisionTable::new(&LEVERAGE_RULES, Leverage::Caution);

fn high_returns(s: &FundamentalSnapshot) -> bool {
    above(s.roa, 5.0) && above(s.roe, 10.0)
}

fn positive_returns(s: &FundamentalSnapshot) -> bool {
    above(s.roa, 0.0) && above(s.roe, 0.0)
}

static PROFITABILITY_RULES: [Rule<FundamentalSnapshot, Profitability>; 2] = [
    Rule { name: "ROA > 5 and ROE > 10", predicate: high_returns, outcome: Profitability::Good },
    Rule { name: "ROA > 0 and ROE > 0", predicate: positive_returns, outcome: Profitability::Average },
];

/// Profitability table.
pub static PROFITABILITY: DecisionTable<FundamentalSnapshot, Profitability> =
    DecisionTable::new(&PROFITABILITY_RULES, Profitability::NeedsMonitoring);

fn both_growing(s: &FundamentalSnapshot) -> bool {
    above(s.revenue_growth, 0.0) && above(s.net_income_growth, 0.0)
}

fn revenue_growing(s: &FundamentalSnapshot) -> bool {
    above(s.revenue_growth, 0.0)
}

static GROWTH_RULES: [Rule<FundamentalSnapshot, Growth>; 2] = [
    Rule {
        name: "revenue growth > 0 and net income growth > 0",
        predicate: both_growing,
        outcome: Growth::Growing,
    },
    Rule { name: "revenue growth > 0", predicate: revenue_growing, outcome: Growth::RevenueOnly },
];

/// Growth table.
pub static GROWTH: DecisionTable<FundamentalSnapshot, Growth> =
    DecisionTable::new(&GROWTH_RULES, Growth::Concerning);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some(2.0), Some(0.5), Liquidity::Good)]
    #[case(Some(1.5), Some(0.3), Liquidity::Good)]
    #[case(Some(1.5), Some(0.29), Liquidity::Acceptable)]
    #[case(Some(1.0), None, Liquidity::Acceptable)]
    #[case(Some(0.99), Some(5.0), Liquidity::NeedsAttention)]
    #[case(None, Some(5.0), Liquidity::NeedsAttention)]
    fn liquidity(#[case] current: Option<f64>, #[case] cash: Option<f64>, #[case] expected: Liquidity) {
        let s = FundamentalSnapshot { current_ratio: current, cash_ratio: cash, ..Default::default() };
        assert_eq!(LIQUIDITY.evaluate(&s), expected);
    }

    #[rstest]
    #[case(Some(0.2), Leverage::Safe)]
    #[case(Some(0.4), Leverage::Moderate)]
    #[case(Some(0.59), Leverage::Moderate)]
    #[case(Some(0.6), Leverage::Caution)]
    #[case(Some(0.65), Leverage::Caution)]
    #[case(None, Leverage::Caution)]
    fn leverage(#[case] debt: Option<f64>, #[case] expected: Leverage) {
        let s = FundamentalSnapshot { debt_to_asset: debt, ..Default::default() };
        assert_eq!(LEVERAGE.evaluate(&s), expected);
    }

    #[rstest]
    #[case(Some(6.0), Some(12.0), Profitability::Good)]
    #[case(Some(5.0), Some(12.0), Profitability::Average)]
    #[case(Some(6.0), Some(10.0), Profitability::Average)]
    #[case(Some(0.1), Some(0.1), Profitability::Average)]
    #[case(Some(0.0), Some(15.0), Profitability::NeedsMonitoring)]
    #[case(Some(-1.0), Some(-3.0), Profitability::NeedsMonitoring)]
    #[case(None, None, Profitability::NeedsMonitoring)]
    fn profitability(
        #[case] roa: Option<f64>,
        #[case] roe: Option<f64>,
        #[case] expected: Profitability,
    ) {
        let s = FundamentalSnapshot { roa, roe, ..Default::default() };
        assert_eq!(PROFITABILITY.evaluate(&s), expected);
    }

    #[rstest]
    #[case(Some(5.0), Some(3.0), Growth::Growing)]
    #[case(Some(5.0), Some(0.0), Growth::RevenueOnly)]
    #[case(Some(5.0), None, Growth::RevenueOnly)]
    #[case(Some(0.0), Some(3.0), Growth::Concerning)]
    #[case(None, Some(3.0), Growth::Concerning)]
    fn growth(#[case] revenue: Option<f64>, #[case] income: Option<f64>, #[case] expected: Growth) {
        let s = FundamentalSnapshot {
            revenue_growth: revenue,
            net_income_growth: income,
            ..Default::default()
        };
        assert_eq!(GROWTH.evaluate(&s), expected);
    }

    #[test]
    fn labels() {
        assert_eq!(Growth::RevenueOnly.to_string(), "revenue up, profit unclear");
        assert_eq!(Liquidity::NeedsAttention.label(), "needs attention");
        assert_eq!(LEVERAGE.matching_rule(&FundamentalSnapshot::default()).map(|r| r.name), None);
    }
}
