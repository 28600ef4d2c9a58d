//! Dashboard session: sources, memoized tables and every query.

use std::{collections::BTreeMap, fmt};

use healthboard_primitives::{
    Date, FilterSpec, HealthGroup, Ticker, Year,
    columns::{AVG_MARKET_CAP, AVG_VOLUME, HEALTH_GROUP, MARKET_CAP, PRICE, TICKER, VOLUME, YEAR},
};
use healthboard_rules::HealthReport;
use healthboard_traits::{LoadError, TableSource};
use healthboard_utils::{ColumnReport, Normalizer, build_master, yearly_mean, yearly_price_stats};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    CompanyProfile, DashboardConfig, DashboardError, DataLocator, DerivedKey, FileSource,
    FilterOptions, FlowAnalysis, FrameSource, MarketInsights, MarketKpis, SourceFiles,
    StatementBook, TableCache, YearlyFlow, analyze_daily_flow, apply_filter,
    company::find_row,
    frame::first_i32,
    snapshot_of, ticker_series, yearly_flow,
};

/// Role a source table plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceRole {
    /// Fundamentals with health scores, the master anchor.
    Fundamentals,
    /// Yearly foreign flow.
    YearlyFlow,
    /// Daily foreign flow.
    DailyFlow,
    /// Daily prices.
    Price,
    /// Daily market capitalization.
    MarketCap,
    /// Daily traded volume.
    Volume,
}

impl SourceRole {
    /// Every role.
    pub const ALL: [Self; 6] =
        [Self::Fundamentals, Self::YearlyFlow, Self::DailyFlow, Self::Price, Self::MarketCap, Self::Volume];

    /// Whether the master table cannot be built without this source.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Fundamentals | Self::YearlyFlow | Self::Price | Self::MarketCap)
    }

    /// Configured file stem of this source.
    #[must_use]
    pub fn stem(self, files: &SourceFiles) -> &str {
        match self {
            Self::Fundamentals => &files.fundamentals,
            Self::YearlyFlow => &files.yearly_flow,
            Self::DailyFlow => &files.daily_flow,
            Self::Price => &files.price,
            Self::MarketCap => &files.market_cap,
            Self::Volume => &files.volume,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Fundamentals => "fundamentals",
            Self::YearlyFlow => "yearly_flow",
            Self::DailyFlow => "daily_flow",
            Self::Price => "price",
            Self::MarketCap => "market_cap",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The source tables of a session.
#[derive(Debug, Default)]
pub struct SourceSet {
    tables: BTreeMap<SourceRole, Box<dyn TableSource>>,
    statements: Vec<(Year, Box<dyn TableSource>)>,
}

impl SourceSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory sources, one per role.
    #[must_use]
    pub fn from_frames(frames: impl IntoIterator<Item = (SourceRole, DataFrame)>) -> Self {
        frames.into_iter().fold(Self::new(), |set, (role, frame)| {
            set.with(role, FrameSource::new(role.label(), frame))
        })
    }

    /// Use `source` for `role`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, role: SourceRole, source: impl TableSource + 'static) -> Self {
        self.tables.insert(role, Box::new(source));
        self
    }

    /// Add the statement table of `year`.
    #[must_use]
    pub fn with_statement(mut self, year: Year, source: impl TableSource + 'static) -> Self {
        self.statements.push((year, Box::new(source)));
        self
    }

    /// Find the configured files in the configured data directories.
    ///
    /// The first directory holding every required file is used. Optional
    /// tables and statement years missing from it are skipped.
    ///
    /// # Errors
    /// Returns `LoadError::NotFound` if no directory holds every required file.
    pub fn discover(config: &DashboardConfig) -> Result<Self, LoadError> {
        let required: Vec<&str> = SourceRole::ALL
            .iter()
            .filter(|role| role.is_required())
            .map(|role| role.stem(&config.files))
            .collect();
        let dir = DataLocator::from_config(config).locate(&required)?;

        let mut set = Self::new();
        for role in SourceRole::ALL {
            match DataLocator::find_file(&dir, role.stem(&config.files)) {
                Some(path) => set = set.with(role, FileSource::new(path)),
                None => warn!(%role, dir = %dir.display(), "optional table not found, skipping"),
            }
        }
        for &year in &config.statement_years {
            let stem = config.files.statement_stem(year);
            match DataLocator::find_file(&dir, &stem) {
                Some(path) => set = set.with_statement(year, FileSource::new(path)),
                None => debug!(year, "no statement file"),
            }
        }
        Ok(set)
    }

    /// Source of `role`, if configured.
    #[must_use]
    pub fn get(&self, role: SourceRole) -> Option<&dyn TableSource> {
        self.tables.get(&role).map(|source| source.as_ref())
    }

    fn key(&self, role: SourceRole) -> String {
        self.get(role).map_or_else(|| format!("missing:{role}"), |s| s.key().to_string())
    }
}

/// A dashboard session over one set of sources.
///
/// Every table is loaded on first use and memoized until
/// [`Session::clear_cache`].
#[derive(Debug)]
pub struct Session {
    config: DashboardConfig,
    sources: SourceSet,
    normalizer: Normalizer,
    cache: TableCache,
    statements: Option<StatementBook>,
}

impl Session {
    /// Create a session over explicit sources.
    #[must_use]
    pub fn new(config: DashboardConfig, sources: SourceSet) -> Self {
        Self { config, sources, normalizer: Normalizer::default(), cache: TableCache::new(), statements: None }
    }

    /// Create a session over the files found with `config`.
    ///
    /// # Errors
    /// Returns `DashboardError::Load` if the required files cannot be found.
    pub fn open(config: DashboardConfig) -> Result<Self, DashboardError> {
        let sources = SourceSet::discover(&config)?;
        info!("opened session");
        Ok(Self::new(config, sources))
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Memoization state.
    #[must_use]
    pub const fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Drop every memoized table.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.statements = None;
        debug!("cleared session cache");
    }

    /// Normalized table of `role`.
    ///
    /// A missing optional source yields an empty table.
    ///
    /// # Errors
    /// Returns `DashboardError::Load` if the source cannot be read or the
    /// fundamentals source is missing.
    pub fn table(&mut self, role: SourceRole) -> Result<DataFrame, DashboardError> {
        let Some(source) = self.sources.get(role) else {
            if role == SourceRole::Fundamentals {
                return Err(LoadError::NotFound {
                    searched: self.config.data_dirs.clone(),
                    missing: vec![role.stem(&self.config.files).to_string()],
                }
                .into());
            }
            warn!(%role, "no source configured, using an empty table");
            return Ok(DataFrame::empty());
        };
        let raw = self.cache.load(source)?;
        let normalizer = &self.normalizer;
        self.cache.derive(DerivedKey::new("normalized", [source.key()]), || {
            Ok::<_, DashboardError>(normalizer.normalize(&raw)?)
        })
    }

    /// Yearly statistics of a daily source, one row per (Ticker, Year).
    ///
    /// Price yields mean, max and min; market cap and volume their mean.
    /// Other roles, and daily tables missing their columns, yield an empty
    /// table.
    ///
    /// # Errors
    /// Returns `DashboardError` if the daily table cannot be loaded.
    pub fn yearly_stats(&mut self, role: SourceRole) -> Result<DataFrame, DashboardError> {
        let (value, stage) = match role {
            SourceRole::Price => (PRICE, "price_stats"),
            SourceRole::MarketCap => (MARKET_CAP, "market_cap_mean"),
            SourceRole::Volume => (VOLUME, "volume_mean"),
            _ => {
                warn!(%role, "not a daily series, no yearly statistics");
                return Ok(DataFrame::empty());
            }
        };
        let daily = self.table(role)?;
        let report = ColumnReport::check(&daily, &[TICKER, YEAR, value]);
        if !report.is_complete() {
            warn!(%role, missing = ?report.missing, "cannot aggregate, skipping");
            return Ok(DataFrame::empty());
        }
        let key = DerivedKey::new(stage, [self.sources.key(role)]);
        self.cache.derive(key, || {
            let out = match role {
                SourceRole::Price => yearly_price_stats(&daily),
                SourceRole::MarketCap => yearly_mean(&daily, MARKET_CAP, AVG_MARKET_CAP),
                _ => yearly_mean(&daily, VOLUME, AVG_VOLUME),
            };
            Ok::<_, DashboardError>(out?)
        })
    }

    /// Master table: fundamentals joined with yearly flow, price and market cap.
    ///
    /// # Errors
    /// Returns `DashboardError` if a source cannot be loaded or the
    /// fundamentals lack the key columns.
    pub fn master(&mut self) -> Result<DataFrame, DashboardError> {
        let fundamentals = self.table(SourceRole::Fundamentals)?;
        let flows = self.table(SourceRole::YearlyFlow)?;
        let prices = self.yearly_stats(SourceRole::Price)?;
        let caps = self.yearly_stats(SourceRole::MarketCap)?;
        let inputs = [SourceRole::Fundamentals, SourceRole::YearlyFlow, SourceRole::Price, SourceRole::MarketCap]
            .map(|role| self.sources.key(role));
        self.cache.derive(DerivedKey::new("master", inputs), || {
            let master = build_master(&fundamentals, &[&flows, &prices, &caps])?;
            info!(rows = master.height(), columns = master.width(), "built master table");
            Ok::<_, DashboardError>(master)
        })
    }

    /// Values available to the filter controls.
    ///
    /// # Errors
    /// Returns `DashboardError` if the master table cannot be built.
    pub fn options(&mut self) -> Result<FilterOptions, DashboardError> {
        FilterOptions::from_master(&self.master()?)
    }

    /// Master rows selected by `spec`.
    ///
    /// # Errors
    /// Returns `DashboardError` if the master table cannot be built.
    pub fn filter(&mut self, spec: &FilterSpec) -> Result<DataFrame, DashboardError> {
        apply_filter(&self.master()?, spec)
    }

    /// Headline KPIs of the rows selected by `spec`.
    ///
    /// # Errors
    /// Returns `DashboardError` if the master table cannot be built.
    pub fn kpis(&mut self, spec: &FilterSpec) -> Result<MarketKpis, DashboardError> {
        let subset = self.filter(spec)?;
        Ok(MarketKpis::compute(&subset, &self.config.kpi)?)
    }

    /// Market overview of the rows selected by `spec`.
    ///
    /// # Errors
    /// Returns `DashboardError` if a table cannot be built.
    pub fn insights(&mut self, spec: &FilterSpec, top_n: usize) -> Result<MarketInsights, DashboardError> {
        let subset = self.filter(spec)?;
        let flows = self.table(SourceRole::YearlyFlow)?;
        MarketInsights::compute(&subset, &flows, top_n, self.config.suggestion_rows, &self.config.kpi)
    }

    /// Company card of (ticker, year), `None` when absent.
    ///
    /// # Errors
    /// Returns `DashboardError` if the master table cannot be built.
    pub fn company(&mut self, ticker: &Ticker, year: Year) -> Result<Option<CompanyProfile>, DashboardError> {
        Ok(CompanyProfile::lookup(&self.master()?, ticker, year)?)
    }

    /// Rule assessment of (ticker, year), `None` when absent.
    ///
    /// # Errors
    /// Returns `DashboardError` if the master table cannot be built.
    pub fn assess(&mut self, ticker: &Ticker, year: Year) -> Result<Option<HealthReport>, DashboardError> {
        let Some(row) = find_row(&self.master()?, ticker, year)? else {
            return Ok(None);
        };
        let snapshot = snapshot_of(&row, 0)?;
        let group = HealthGroup::from_code(first_i32(&row, HEALTH_GROUP)?);
        Ok(Some(HealthReport::assess(&snapshot, group)))
    }

    /// Daily flow analysis of (ticker, year).
    ///
    /// # Errors
    /// Returns `DashboardError` if the daily flow table cannot be loaded.
    pub fn daily_flow(&mut self, ticker: &Ticker, year: Year) -> Result<FlowAnalysis, DashboardError> {
        let daily = self.table(SourceRole::DailyFlow)?;
        analyze_daily_flow(&daily, ticker, year, &self.config.flow)
    }

    /// Yearly flow series of `ticker`.
    ///
    /// # Errors
    /// Returns `DashboardError` if the yearly flow table cannot be loaded.
    pub fn yearly_flow(&mut self, ticker: &Ticker) -> Result<YearlyFlow, DashboardError> {
        let flows = self.table(SourceRole::YearlyFlow)?;
        yearly_flow(&flows, ticker)
    }

    /// Dated rows of `ticker` from a daily source within `[from, to]`.
    ///
    /// # Errors
    /// Returns `DashboardError` if the table cannot be loaded.
    pub fn series(
        &mut self,
        role: SourceRole,
        ticker: &Ticker,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<DataFrame, DashboardError> {
        let table = self.table(role)?;
        ticker_series(&table, ticker, from, to)
    }

    /// Statement rows of `ticker`, newest year first.
    ///
    /// Statement files that cannot be read are skipped.
    ///
    /// # Errors
    /// Returns `DashboardError` if the statements cannot be stacked.
    pub fn statements(&mut self, ticker: &Ticker) -> Result<DataFrame, DashboardError> {
        if self.statements.is_none() {
            let mut tables = Vec::new();
            for (year, source) in &self.sources.statements {
                match self.cache.load(source.as_ref()) {
                    Ok(table) => tables.push((*year, table)),
                    Err(err) => warn!(year, %err, "skipping unreadable statement table"),
                }
            }
            self.statements = Some(StatementBook::from_tables(tables)?);
        }
        match &self.statements {
            Some(book) => book.for_ticker(ticker),
            None => Ok(DataFrame::empty()),
        }
    }
}
