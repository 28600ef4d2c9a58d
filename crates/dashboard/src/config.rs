//! Session configuration.

use std::path::{Path, PathBuf};

use healthboard_primitives::Year;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::DashboardError;

/// File stems of the source tables, without extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    /// Fundamentals with health scores and ratios.
    pub fundamentals: String,
    /// Yearly foreign flow.
    pub yearly_flow: String,
    /// Daily foreign flow.
    pub daily_flow: String,
    /// Daily prices.
    pub price: String,
    /// Daily market capitalization.
    pub market_cap: String,
    /// Daily traded volume.
    pub volume: String,
    /// Statement file pattern; `{year}` is replaced by the year.
    pub statements: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            fundamentals: "Data_health_score_dashboard".to_string(),
            yearly_flow: "data_dau_tu".to_string(),
            daily_flow: "df_ft_sorted_2021_2024".to_string(),
            price: "Price_2124".to_string(),
            market_cap: "Marketcap_2124".to_string(),
            volume: "Volume_2124".to_string(),
            statements: "{year}_BCTC".to_string(),
        }
    }
}

impl SourceFiles {
    /// Stem of the statement file for a year.
    #[must_use]
    pub fn statement_stem(&self, year: Year) -> String {
        self.statements.replace("{year}", &year.to_string())
    }
}

/// Configuration for the daily flow analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Short moving average window, in observations.
    pub short_window: usize,
    /// Long moving average window, in observations.
    pub long_window: usize,
    /// Number of trailing observations the trend is read from.
    pub trend_window: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self { short_window: 20, long_window: 30, trend_window: 30 }
    }
}

/// Configuration for KPI display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    /// Divisor applied to the summed market capitalization.
    pub market_cap_divisor: f64,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self { market_cap_divisor: 1e9 }
    }
}

/// Configuration of a dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Candidate data directories, probed in order.
    pub data_dirs: Vec<PathBuf>,
    /// Source file stems.
    pub files: SourceFiles,
    /// Years whose statement files are loaded when present.
    pub statement_years: Vec<Year>,
    /// Flow analysis settings.
    pub flow: FlowConfig,
    /// KPI settings.
    pub kpi: KpiConfig,
    /// Rows of the suggestion table.
    pub suggestion_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dirs: vec![PathBuf::from("."), PathBuf::from("Data dash"), PathBuf::from("DATA")],
            files: SourceFiles::default(),
            statement_years: (2021..=2024).collect(),
            flow: FlowConfig::default(),
            kpi: KpiConfig::default(),
            suggestion_rows: 20,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Absent fields keep their defaults.
    ///
    /// # Errors
    /// Returns `DashboardError::ConfigIo` or `DashboardError::ConfigParse`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| DashboardError::ConfigIo { path: path.to_path_buf(), source })?;
        let config = serde_json::from_str(&text)
            .map_err(|source| DashboardError::ConfigParse { path: path.to_path_buf(), source })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Probe `dir` before the configured directories.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dirs.insert(0, dir.into());
        self
    }
}
