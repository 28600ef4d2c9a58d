//! # healthboard
//!
//! Financial health dashboard pipeline for listed companies.
//!
//! This crate provides a unified interface to the healthboard crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions and column names
//! - `traits`: Table source and metric abstractions
//! - `math`: Null-tolerant statistics and rolling windows
//! - `utils`: Normalization, yearly aggregation and joins
//! - `rules`: Threshold rule tables and health reports
//! - `dashboard`: Sessions, filtering, KPIs and company analysis
//! - `cli`: The `healthboard` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use healthboard::dashboard::prelude::*;
//!
//! let mut session = Session::open(DashboardConfig::default())?;
//! let kpis = session.kpis(&FilterSpec::for_year(2024))?;
//! println!("{} tickers, mean health {:.1}", kpis.ticker_count, kpis.avg_health_score);
//! ```

#![doc(issue_tracker_base_url = "https://github.com/healthboard/healthboard/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use healthboard_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use healthboard_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use healthboard_math as math;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use healthboard_utils as utils;
#[cfg(feature = "rules")]
#[doc(inline)]
pub use healthboard_rules as rules;
#[cfg(feature = "dashboard")]
#[doc(inline)]
pub use healthboard_dashboard as dashboard;
