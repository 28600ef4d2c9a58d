//! Top-level suggestion from the composite Z-score.

use std::fmt;

use healthboard_primitives::FundamentalSnapshot;
use serde::Serialize;

use crate::table::{DecisionTable, Rule, above};

/// Recommendation shown with the Z-score panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    /// Health_Z above 1 with an investment-grade rating.
    LongTermHolding,
    /// Health_Z above 0.
    MonitorIndicators,
    /// Health_Z at or below 0.
    CautionAdvised,
    /// Health_Z unavailable.
    InsufficientData,
}

impl Suggestion {
    /// Suggestion for a snapshot.
    #[must_use]
    pub fn for_snapshot(snapshot: &FundamentalSnapshot) -> Self {
        match snapshot.health_z {
            Some(z) if !z.is_nan() => SUGGESTION.evaluate(snapshot),
            _ => Self::InsufficientData,
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LongTermHolding => "suitable for long-term holding",
            Self::MonitorIndicators => "monitor indicators",
            Self::CautionAdvised => "caution advised",
            Self::InsufficientData => "insufficient data",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn strong_composite(s: &FundamentalSnapshot) -> bool {
    above(s.health_z, 1.0) && s.has_investment_grade()
}

fn positive_composite(s: &FundamentalSnapshot) -> bool {
    above(s.health_z, 0.0)
}

static SUGGESTION_RULES: [Rule<FundamentalSnapshot, Suggestion>; 2] = [
    Rule {
        name: "Health_Z > 1 and investment grade",
        predicate: strong_composite,
        outcome: Suggestion::LongTermHolding,
    },
    Rule { name: "Health_Z > 0", predicate: positive_composite, outcome: Suggestion::MonitorIndicators },
];

/// Suggestion table for snapshots that carry a `Health_Z`.
pub static SUGGESTION: DecisionTable<FundamentalSnapshot, Suggestion> =
    DecisionTable::new(&SUGGESTION_RULES, Suggestion::CautionAdvised);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some(1.5), Some("A"), Suggestion::LongTermHolding)]
    #[case(Some(1.5), Some("BBB"), Suggestion::MonitorIndicators)]
    #[case(Some(1.0), Some("AAA"), Suggestion::MonitorIndicators)]
    #[case(Some(0.0), Some("AAA"), Suggestion::CautionAdvised)]
    #[case(Some(-0.7), None, Suggestion::CautionAdvised)]
    #[case(None, Some("AAA"), Suggestion::InsufficientData)]
    #[case(Some(f64::NAN), Some("AAA"), Suggestion::InsufficientData)]
    fn suggestion(
        #[case] health_z: Option<f64>,
        #[case] rating: Option<&str>,
        #[case] expected: Suggestion,
    ) {
        let s = FundamentalSnapshot {
            health_z,
            credit_rating: rating.map(String::from),
            ..Default::default()
        };
        assert_eq!(Suggestion::for_snapshot(&s), expected);
    }
}
