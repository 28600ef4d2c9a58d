//! Investment call from the health score, rating and net-buy flag.

use std::fmt;

use healthboard_primitives::FundamentalSnapshot;
use serde::Serialize;

use crate::table::{DecisionTable, Rule, at_least};

/// Overall investment call for a company-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentCall {
    /// Strong fundamentals and an investment-grade rating.
    StrongFollow,
    /// Good fundamentals backed by foreign net buying.
    GoodPotential,
    /// Average fundamentals.
    AverageWatch,
    /// Everything else.
    Caution,
}

impl InvestmentCall {
    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongFollow => "strong / follow",
            Self::GoodPotential => "good / potential",
            Self::AverageWatch => "average / watch",
            Self::Caution => "caution",
        }
    }
}

impl fmt::Display for InvestmentCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn strong(s: &FundamentalSnapshot) -> bool {
    at_least(s.health_score, 75.0) && s.has_investment_grade()
}

fn good_with_buying(s: &FundamentalSnapshot) -> bool {
    at_least(s.health_score, 65.0) && s.buy_net_flag == Some(1)
}

fn average(s: &FundamentalSnapshot) -> bool {
    at_least(s.health_score, 60.0)
}

static INVESTMENT_RULES: [Rule<FundamentalSnapshot, InvestmentCall>; 3] = [
    Rule {
        name: "health score >= 75 and investment grade",
        predicate: strong,
        outcome: InvestmentCall::StrongFollow,
    },
    Rule {
        name: "health score >= 65 and net buying",
        predicate: good_with_buying,
        outcome: InvestmentCall::GoodPotential,
    },
    Rule { name: "health score >= 60", predicate: average, outcome: InvestmentCall::AverageWatch },
];

/// Investment call table.
pub static INVESTMENT: DecisionTable<FundamentalSnapshot, InvestmentCall> =
    DecisionTable::new(&INVESTMENT_RULES, InvestmentCall::Caution);
