#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/healthboard/healthboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod columns;

mod ticker;
pub use ticker::Ticker;

mod rating;
pub use rating::{INVESTMENT_GRADE, is_investment_grade};

mod flow;
pub use flow::{FlowDirection, FlowPoint, ParseFlowDirectionError};

mod group;
pub use group::HealthGroup;

mod filter;
pub use filter::FilterSpec;

mod snapshot;
pub use snapshot::{FundamentalSnapshot, ZScores};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;

/// Calendar year used as the second half of every (Ticker, Year) key.
pub type Year = i32;
