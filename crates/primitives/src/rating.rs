//! Credit rating categories.

/// The top three rating categories.
pub const INVESTMENT_GRADE: [&str; 3] = ["AAA", "AA", "A"];

/// Whether a rating belongs to the investment-grade set.
#[must_use]
pub fn is_investment_grade(rating: &str) -> bool {
    INVESTMENT_GRADE.contains(&rating.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_three_are_investment_grade() {
        assert!(is_investment_grade("AAA"));
        assert!(is_investment_grade("AA"));
        assert!(is_investment_grade(" A "));
    }

    #[test]
    fn lower_ratings_are_not() {
        assert!(!is_investment_grade("BBB"));
        assert!(!is_investment_grade("a"));
        assert!(!is_investment_grade(""));
    }
}
