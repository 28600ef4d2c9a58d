#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/healthboard/healthboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod stats;
pub use stats::{max, mean, min, percentage, sum, tail_mean};

mod rolling;
pub use rolling::{TrailingMean, trailing_mean};

mod error;
pub use error::MathError;
