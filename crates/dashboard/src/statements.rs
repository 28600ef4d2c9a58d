//! Detailed yearly financial statements.

use std::collections::HashSet;

use healthboard_primitives::{Ticker, Year};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::DashboardError;

/// Header of the statement year column.
const YEAR_HEADER: &str = "NĂM";
/// Header of the statement ticker column.
const TICKER_HEADER: &str = "MÃ";

/// Statement columns shown for a company, in display order.
pub const STATEMENT_COLUMNS: [&str; 13] = [
    YEAR_HEADER,
    "CĐKT. TÀI SẢN NGẮN HẠN",
    "CĐKT. TỔNG CỘNG TÀI SẢN",
    "CĐKT. TIỀN VÀ TƯƠNG ĐƯƠNG TIỀN",
    "CĐKT. NỢ PHẢI TRẢ",
    "CĐKT. NỢ NGẮN HẠN",
    "CĐKT. VỐN CHỦ SỞ HỮU",
    "CĐKT. TỔNG CỘNG NGUỒN VỐN",
    "KQKD. DOANH THU THUẦN",
    "KQKD. LỢI NHUẬN SAU THUẾ THU NHẬP DOANH NGHIỆP",
    "KQKD. LÃI CƠ BẢN TRÊN CỔ PHIẾU",
    "LCTT. LƯU CHUYỂN TIỀN TỆ RÒNG TỪ CÁC HOẠT ĐỘNG SẢN XUẤT KINH DOANH (TT)",
    "LCTT. TIỀN VÀ TƯƠNG ĐƯƠNG TIỀN CUỐI KỲ (TT)",
];

/// Trim and upper-case every header; later duplicates are dropped.
fn canonical_headers(df: DataFrame) -> PolarsResult<DataFrame> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = column.name().trim().to_uppercase();
        if seen.insert(name.clone()) {
            columns.push(column.clone().with_name(name.into()));
        } else {
            warn!(column = %column.name(), "duplicate statement header dropped");
        }
    }
    DataFrame::new(columns)
}

/// Trimmed, upper-cased text view of the ticker column.
fn canonical_tickers(df: &mut DataFrame) -> PolarsResult<()> {
    let Ok(column) = df.column(TICKER_HEADER) else {
        return Ok(());
    };
    let text = column.cast(&DataType::String)?;
    let cleaned: StringChunked =
        text.str()?.into_iter().map(|v| v.map(|s| s.trim().to_uppercase())).collect();
    df.with_column(cleaned.with_name(TICKER_HEADER.into()).into_series())?;
    Ok(())
}

/// Yearly statements of every company, stacked.
#[derive(Debug, Clone, Default)]
pub struct StatementBook {
    table: DataFrame,
    years: Vec<Year>,
}

impl StatementBook {
    /// Stack per-year statement tables.
    ///
    /// Headers are trimmed and upper-cased, a `NĂM` column carries the year,
    /// and tables with differing columns are aligned with nulls.
    ///
    /// # Errors
    /// Returns `DashboardError::Polars` if the tables cannot be stacked.
    pub fn from_tables(
        tables: impl IntoIterator<Item = (Year, DataFrame)>,
    ) -> Result<Self, DashboardError> {
        let mut frames = Vec::new();
        let mut years = Vec::new();
        for (year, table) in tables {
            let mut table = canonical_headers(table)?;
            table.with_column(Column::new(YEAR_HEADER.into(), vec![year; table.height()]))?;
            canonical_tickers(&mut table)?;
            frames.push(table.lazy());
            years.push(year);
        }
        if frames.is_empty() {
            return Ok(Self::default());
        }
        let table = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;
        debug!(?years, rows = table.height(), "stacked statements");
        Ok(Self { table, years })
    }

    /// Whether no statement table was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Years that were loaded, in load order.
    #[must_use]
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// The stacked table.
    #[must_use]
    pub const fn table(&self) -> &DataFrame {
        &self.table
    }

    /// Display columns of `ticker`, newest year first.
    ///
    /// Display columns missing from the statements are left out. The result is
    /// empty when nothing matches.
    ///
    /// # Errors
    /// Returns `DashboardError::Polars` if the table cannot be filtered.
    pub fn for_ticker(&self, ticker: &Ticker) -> Result<DataFrame, DashboardError> {
        if self.table.column(TICKER_HEADER).is_err() {
            return Ok(DataFrame::empty());
        }
        let shown: Vec<Expr> = STATEMENT_COLUMNS
            .iter()
            .filter(|c| self.table.column(c).is_ok())
            .map(|c| col(*c))
            .collect();
        Ok(self
            .table
            .clone()
            .lazy()
            .filter(col(TICKER_HEADER).eq(lit(ticker.as_str())))
            .select(shown)
            .sort(
                [YEAR_HEADER],
                SortMultipleOptions::default().with_order_descending(true).with_maintain_order(true),
            )
            .collect()?)
    }
}
