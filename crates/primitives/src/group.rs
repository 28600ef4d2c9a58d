//! Health group codes.

use std::fmt;

use serde::Serialize;

/// Health group of a company, decoded from the `Health_Group` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGroup {
    /// Code 0.
    Weak,
    /// Code 1.
    Average,
    /// Code 2.
    Good,
    /// Any other code.
    Other(i32),
    /// No code.
    Undetermined,
}

impl HealthGroup {
    /// Decode a `Health_Group` value.
    #[must_use]
    pub const fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Weak,
            Some(1) => Self::Average,
            Some(2) => Self::Good,
            Some(other) => Self::Other(other),
            None => Self::Undetermined,
        }
    }
}

impl fmt::Display for HealthGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Average => write!(f, "average"),
            Self::Good => write!(f, "good"),
            Self::Other(code) => write!(f, "group {code}"),
            Self::Undetermined => write!(f, "undetermined"),
        }
    }
}
