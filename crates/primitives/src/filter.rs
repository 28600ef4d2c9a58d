//! Dashboard filter selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{FlowDirection, Year};

/// Conjunctive filter over the master table.
///
/// Empty industry and rating sets mean "no restriction". The flow direction
/// set has no such shortcut: an empty set selects no flag at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Selected year.
    pub year: Year,
    /// Selected industries.
    pub industries: BTreeSet<String>,
    /// Selected rating categories.
    pub ratings: BTreeSet<String>,
    /// Selected flow directions.
    pub flow_directions: BTreeSet<FlowDirection>,
}

impl FilterSpec {
    /// Filter on a year only, with both flow directions selected.
    #[must_use]
    pub fn for_year(year: Year) -> Self {
        Self {
            year,
            industries: BTreeSet::new(),
            ratings: BTreeSet::new(),
            flow_directions: FlowDirection::ALL.into_iter().collect(),
        }
    }

    /// Restrict to the given industries.
    #[must_use]
    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given rating categories.
    #[must_use]
    pub fn with_ratings<I, S>(mut self, ratings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ratings = ratings.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the selected flow directions.
    #[must_use]
    pub fn with_flow_directions(mut self, directions: impl IntoIterator<Item = FlowDirection>) -> Self {
        self.flow_directions = directions.into_iter().collect();
        self
    }

    /// `Buy_Net_Flag` values implied by the selected directions.
    #[must_use]
    pub fn flags(&self) -> Vec<i32> {
        self.flow_directions.iter().map(|d| d.flag()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_year_selects_both_directions() {
        let spec = FilterSpec::for_year(2024);
        assert!(spec.industries.is_empty());
        assert!(spec.ratings.is_empty());
        assert_eq!(spec.flags(), vec![1, 0]);
    }

    #[test]
    fn builders_replace_sets() {
        let spec = FilterSpec::for_year(2023)
            .with_industries(["Banks", "Steel"])
            .with_ratings(["AAA"])
            .with_flow_directions([FlowDirection::NetSell]);
        assert_eq!(spec.industries.len(), 2);
        assert!(spec.ratings.contains("AAA"));
        assert_eq!(spec.flags(), vec![0]);
    }
}
