#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/healthboard/healthboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod table;
pub use table::{DecisionTable, Rule};

mod investment;
pub use investment::{INVESTMENT, InvestmentCall};

mod aspects;
pub use aspects::{GROWTH, Growth, LEVERAGE, LIQUIDITY, Leverage, Liquidity, PROFITABILITY, Profitability};

mod warnings;
pub use warnings::{RiskWarning, WARNINGS, risk_warnings};

mod zscore;
pub use zscore::{Z_BANDS, ZBand, ZScoreReading, zscore_panel};

mod suggestion;
pub use suggestion::{SUGGESTION, Suggestion};

mod report;
pub use report::HealthReport;
