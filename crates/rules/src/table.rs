//! Ordered decision tables.

use std::fmt;

/// A named predicate paired with the outcome it selects.
pub struct Rule<I: ?Sized, C> {
    /// Short description of the condition.
    pub name: &'static str,
    /// Condition on the input.
    pub predicate: fn(&I) -> bool,
    /// Outcome when the condition holds.
    pub outcome: C,
}

impl<I: ?Sized, C> Rule<I, C> {
    /// Whether the rule fires for `input`.
    pub fn matches(&self, input: &I) -> bool {
        (self.predicate)(input)
    }
}

impl<I: ?Sized, C: fmt::Debug> fmt::Debug for Rule<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).field("outcome", &self.outcome).finish()
    }
}

/// Rules evaluated in order; the first match wins, otherwise the default.
pub struct DecisionTable<I: ?Sized + 'static, C: 'static> {
    rules: &'static [Rule<I, C>],
    default: C,
}

impl<I: ?Sized, C: Copy> DecisionTable<I, C> {
    /// Create a table from ordered rules and a fallback outcome.
    #[must_use]
    pub const fn new(rules: &'static [Rule<I, C>], default: C) -> Self {
        Self { rules, default }
    }

    /// Outcome of the first matching rule, or the default.
    pub fn evaluate(&self, input: &I) -> C {
        self.matching_rule(input).map_or(self.default, |rule| rule.outcome)
    }

    /// First rule that fires, `None` when the default applies.
    pub fn matching_rule(&self, input: &I) -> Option<&'static Rule<I, C>> {
        self.rules.iter().find(|rule| rule.matches(input))
    }

    /// The ordered rules.
    #[must_use]
    pub const fn rules(&self) -> &'static [Rule<I, C>] {
        self.rules
    }

    /// The fallback outcome.
    #[must_use]
    pub const fn default_outcome(&self) -> C {
        self.default
    }
}

impl<I: ?Sized, C: fmt::Debug> fmt::Debug for DecisionTable<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionTable")
            .field("rules", &self.rules)
            .field("default", &self.default)
            .finish()
    }
}

/// `value > threshold`; false when the value is missing or NaN.
pub(crate) fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

/// `value >= threshold`; false when the value is missing or NaN.
pub(crate) fn at_least(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v >= threshold)
}

/// `value < threshold`; false when the value is missing or NaN.
pub(crate) fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negative(x: &i32) -> bool {
        *x < 0
    }

    fn small(x: &i32) -> bool {
        *x < 10
    }

    static RULES: [Rule<i32, &str>; 2] = [
        Rule { name: "negative", predicate: negative, outcome: "negative" },
        Rule { name: "small", predicate: small, outcome: "small" },
    ];

    static TABLE: DecisionTable<i32, &str> = DecisionTable::new(&RULES, "large");

    #[test]
    fn first_match_wins() {
        assert_eq!(TABLE.evaluate(&-5), "negative");
        assert_eq!(TABLE.evaluate(&5), "small");
        assert_eq!(TABLE.matching_rule(&-5).map(|r| r.name), Some("negative"));
    }

    #[test]
    fn default_when_nothing_matches() {
        assert_eq!(TABLE.evaluate(&50), "large");
        assert!(TABLE.matching_rule(&50).is_none());
        assert_eq!(TABLE.default_outcome(), "large");
        assert_eq!(TABLE.rules().len(), 2);
    }

    #[test]
    fn missing_and_nan_never_compare() {
        assert!(!above(None, 0.0));
        assert!(!at_least(Some(f64::NAN), 0.0));
        assert!(!below(Some(f64::NAN), 0.0));
        assert!(at_least(Some(1.5), 1.5));
        assert!(!above(Some(1.5), 1.5));
    }
}
