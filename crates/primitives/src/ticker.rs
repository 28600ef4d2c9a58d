//! Ticker type definitions.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Stock ticker symbol, the first half of every (Ticker, Year) key.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a ticker, trimming whitespace and upper-casing the symbol.
    #[must_use]
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_uppercase())
    }

    /// Get the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_from_str_normalizes() {
        let t: Ticker = " vnm ".into();
        assert_eq!(t.as_str(), "VNM");
        assert_eq!(t.to_string(), "VNM");
    }

    #[test]
    fn ticker_from_string_is_verbatim() {
        let t = Ticker::from(String::from("fpt"));
        assert_eq!(t.as_str(), "fpt");
    }
}
