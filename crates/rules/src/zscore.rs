//! Banding of standardized ratios.

use std::fmt;

use healthboard_primitives::{FundamentalSnapshot, columns};
use serde::Serialize;

use crate::table::{DecisionTable, Rule};

/// Band of a Z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZBand {
    /// z > 1.
    Good,
    /// 0 < z <= 1.
    Average,
    /// z <= 0.
    NeedsImprovement,
}

impl ZBand {
    /// Band a Z-score.
    #[must_use]
    pub fn classify(z: f64) -> Self {
        Z_BANDS.evaluate(&z)
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Average => "average",
            Self::NeedsImprovement => "needs improvement",
        }
    }
}

impl fmt::Display for ZBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn above_one(z: &f64) -> bool {
    *z > 1.0
}

fn above_zero(z: &f64) -> bool {
    *z > 0.0
}

static Z_RULES: [Rule<f64, ZBand>; 2] = [
    Rule { name: "z > 1", predicate: above_one, outcome: ZBand::Good },
    Rule { name: "z > 0", predicate: above_zero, outcome: ZBand::Average },
];

/// Z-score banding table.
pub static Z_BANDS: DecisionTable<f64, ZBand> = DecisionTable::new(&Z_RULES, ZBand::NeedsImprovement);

/// One banded Z-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZScoreReading {
    /// Ratio the score standardizes, or `Health_Z` for the composite.
    pub metric: &'static str,
    /// Z-score value.
    pub z: f64,
    /// Band of the score.
    pub band: ZBand,
}

/// Available Z-scores of a snapshot in display order, composite last.
///
/// Missing scores are left out.
#[must_use]
pub fn zscore_panel(snapshot: &FundamentalSnapshot) -> Vec<ZScoreReading> {
    snapshot
        .z_scores
        .iter()
        .chain(std::iter::once((columns::HEALTH_Z, snapshot.health_z)))
        .filter_map(|(metric, z)| z.filter(|z| !z.is_nan()).map(|z| (metric, z)))
        .map(|(metric, z)| ZScoreReading { metric, z, band: ZBand::classify(z) })
        .collect()
}

#[cfg(test)]
mod tests {
    use healthboard_primitives::ZScores;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1.5, ZBand::Good)]
    #[case(1.0, ZBand::Average)]
    #[case(0.01, ZBand::Average)]
    #[case(0.0, ZBand::NeedsImprovement)]
    #[case(-2.0, ZBand::NeedsImprovement)]
    #[case(f64::NAN, ZBand::NeedsImprovement)]
    fn bands(#[case] z: f64, #[case] expected: ZBand) {
        assert_eq!(ZBand::classify(z), expected);
    }

    #[test]
    fn panel_skips_missing_and_appends_composite() {
        let mut z_scores = ZScores::default();
        z_scores.set(columns::ROE, Some(1.2));
        z_scores.set(columns::ROA, Some(-0.3));
        let s = FundamentalSnapshot { z_scores, health_z: Some(0.4), ..Default::default() };
        let panel = zscore_panel(&s);
        let metrics: Vec<_> = panel.iter().map(|r| r.metric).collect();
        assert_eq!(metrics, vec![columns::ROA, columns::ROE, columns::HEALTH_Z]);
        assert_eq!(panel[0].band, ZBand::NeedsImprovement);
        assert_eq!(panel[1].band, ZBand::Good);
        assert_eq!(panel[2].band, ZBand::Average);
    }

    #[test]
    fn empty_panel() {
        assert!(zscore_panel(&FundamentalSnapshot::default()).is_empty());
    }
}
