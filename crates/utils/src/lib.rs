#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/healthboard/healthboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod dates;
pub use dates::{date_from_epoch_days, epoch_days, parse_date};

mod normalize;
pub use normalize::{ColumnReport, Normalizer, RENAMES, normalize};

mod aggregate;
pub use aggregate::{yearly_mean, yearly_price_stats};

mod join;
pub use join::{MISSING_SENTINELS, build_master, clean_category, dedupe_keys};

mod rank;
pub use rank::top_n_by;

mod error;
pub use error::UtilsError;
