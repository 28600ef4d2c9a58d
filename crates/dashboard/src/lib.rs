#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/healthboard/healthboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{DashboardConfig, FlowConfig, KpiConfig, SourceFiles};

mod source;
pub use source::{FileSource, FrameSource, SUPPORTED_EXTENSIONS, read_table};

mod locator;
pub use locator::DataLocator;

mod cache;
pub use cache::{DerivedKey, TableCache};

mod frame;

mod filter;
pub use filter::{FilterOptions, apply_filter, top_by_health};

mod kpi;
pub use kpi::{
    AvgHealthScore, AvgPrice, InvestmentGradeShare, MarketCapTotal, MarketKpis, MaxPrice, MinPrice,
    NetBuyShare, TickerCount,
};

mod flow;
pub use flow::{FlowAnalysis, FlowStance, FlowTrend, YearlyFlow, YearlyFlowPoint, analyze_daily_flow, yearly_flow};

mod insights;
pub use insights::{
    FlowByGroup, IndustryHealth, IndustryRating, MarketInsights, RankedCompany, RatingCount,
    SuggestionRow,
};

mod company;
pub use company::{CompanyProfile, snapshot_of, ticker_series};

mod statements;
pub use statements::{STATEMENT_COLUMNS, StatementBook};

mod session;
pub use session::{Session, SourceRole, SourceSet};

mod error;
pub use error::DashboardError;

/// Re-export commonly used types.
pub mod prelude {
    pub use healthboard_primitives::{FilterSpec, FlowDirection, Ticker, Year};
    pub use healthboard_rules::HealthReport;
    pub use healthboard_traits::{Metric, TableSource};

    pub use super::{DashboardConfig, DashboardError, MarketInsights, MarketKpis, Session, SourceSet};
}
