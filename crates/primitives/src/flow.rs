//! Foreign-investor flow types.

use std::{fmt, str::FromStr};

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Date;

/// Direction of the yearly foreign net flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// Foreign investors bought more than they sold.
    NetBuy,
    /// Foreign investors sold more than they bought.
    NetSell,
}

impl FlowDirection {
    /// Both directions, the unrestricted selection.
    pub const ALL: [Self; 2] = [Self::NetBuy, Self::NetSell];

    /// Value of `Buy_Net_Flag` encoding this direction.
    #[must_use]
    pub const fn flag(self) -> i32 {
        match self {
            Self::NetBuy => 1,
            Self::NetSell => 0,
        }
    }

    /// Decode a `Buy_Net_Flag` value.
    #[must_use]
    pub const fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            1 => Some(Self::NetBuy),
            0 => Some(Self::NetSell),
            _ => None,
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetBuy => write!(f, "net buy"),
            Self::NetSell => write!(f, "net sell"),
        }
    }
}

/// Error returned when a flow direction cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("unknown flow direction `{_0}` (expected buy or sell)")]
pub struct ParseFlowDirectionError(String);

impl std::error::Error for ParseFlowDirectionError {}

impl FromStr for FlowDirection {
    type Err = ParseFlowDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "buy" | "netbuy" | "1" => Ok(Self::NetBuy),
            "sell" | "netsell" | "0" => Ok(Self::NetSell),
            _ => Err(ParseFlowDirectionError(s.to_string())),
        }
    }
}

/// One observation of a daily flow series with its trailing averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowPoint {
    /// Trading date.
    pub date: Date,
    /// Daily foreign net flow.
    pub net_flow: f64,
    /// Short trailing moving average.
    pub ma_short: Option<f64>,
    /// Long trailing moving average.
    pub ma_long: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_round_trip() {
        for direction in FlowDirection::ALL {
            assert_eq!(FlowDirection::from_flag(direction.flag()), Some(direction));
        }
        assert_eq!(FlowDirection::from_flag(2), None);
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!("buy".parse::<FlowDirection>().unwrap(), FlowDirection::NetBuy);
        assert_eq!("Net-Sell".parse::<FlowDirection>().unwrap(), FlowDirection::NetSell);
        assert_eq!("net_buy".parse::<FlowDirection>().unwrap(), FlowDirection::NetBuy);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "hold".parse::<FlowDirection>().unwrap_err();
        assert!(err.to_string().contains("hold"));
    }
}
