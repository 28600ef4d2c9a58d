//! Canonical column names of the normalized tables.
//!
//! Every source table is renamed onto these names before it reaches the
//! aggregation, join or analysis stages.

/// Stock symbol.
pub const TICKER: &str = "Ticker";
/// Calendar year.
pub const YEAR: &str = "Year";
/// Trading date.
pub const DATE: &str = "Date";
/// Company name.
pub const COMPANY: &str = "Company";
/// Industry classification.
pub const INDUSTRY: &str = "Industry";

/// Daily closing price.
pub const PRICE: &str = "Price";
/// Daily traded volume.
pub const VOLUME: &str = "Volume";
/// Daily market capitalization.
pub const MARKET_CAP: &str = "MarketCap";

/// Composite 0-100 health score.
pub const HEALTH_SCORE: &str = "Health_Score";
/// Health group code (0 weak, 1 average, 2 good).
pub const HEALTH_GROUP: &str = "Health_Group";
/// Health group label as shipped in the fundamentals table.
pub const HEALTH_LABEL: &str = "Health_Label";
/// Credit rating derived from the health model.
pub const CREDIT_RATING: &str = "Credit_Rating_Z";
/// Composite health Z-score.
pub const HEALTH_Z: &str = "Health_Z";

/// Net-buy flag of the yearly flow table (1 buy, 0 sell).
pub const BUY_NET_FLAG: &str = "Buy_Net_Flag";
/// Yearly foreign net flow value.
pub const TOTAL_NET_FLOW: &str = "Total_Net_F_Val";
/// Daily foreign net flow value.
pub const NET_FLOW: &str = "Net.F_Val";

/// Yearly mean price.
pub const AVG_PRICE: &str = "Avg_Price";
/// Yearly maximum price.
pub const MAX_PRICE: &str = "Max_Price";
/// Yearly minimum price.
pub const MIN_PRICE: &str = "Min_Price";
/// Yearly mean market capitalization.
pub const AVG_MARKET_CAP: &str = "Avg_MarketCap";
/// Yearly mean traded volume.
pub const AVG_VOLUME: &str = "Avg_Volume";

/// Short trailing moving average of the daily flow.
pub const MA_SHORT: &str = "MA_Short";
/// Long trailing moving average of the daily flow.
pub const MA_LONG: &str = "MA_Long";

/// Current assets over current liabilities.
pub const CURRENT_RATIO: &str = "Current Ratio";
/// Cash over current liabilities.
pub const CASH_RATIO: &str = "Cash Ratio";
/// Operating profit over interest expense.
pub const INTEREST_COVERAGE: &str = "Interest Coverage";
/// Total liabilities over total assets.
pub const DEBT_TO_ASSET: &str = "Debt to Asset";
/// Equity over total assets.
pub const EQUITY_RATIO: &str = "Equity Ratio";
/// Return on assets, in percent.
pub const ROA: &str = "ROA";
/// Return on equity, in percent.
pub const ROE: &str = "ROE";
/// Net profit over revenue.
pub const NET_PROFIT_MARGIN: &str = "Net Profit Margin";
/// Operating profit over revenue.
pub const OPERATING_PROFIT_MARGIN: &str = "Operating Profit Margin";
/// Revenue over total assets.
pub const TOTAL_ASSET_TURNOVER: &str = "Total Asset Turnover";
/// Year-over-year revenue growth, in percent.
pub const REVENUE_GROWTH: &str = "Revenue Growth";
/// Year-over-year net income growth, in percent.
pub const NET_INCOME_GROWTH: &str = "Net Income Growth";
/// Year-over-year total asset growth, in percent.
pub const ASSET_GROWTH: &str = "Asset Growth";

/// Suffix of the per-ratio Z-score columns.
pub const Z_SUFFIX: &str = "_z";

/// Composite key of every yearly table.
pub const KEY: [&str; 2] = [TICKER, YEAR];

/// Raw financial ratios of the fundamentals table.
pub const RATIOS: [&str; 13] = [
    CURRENT_RATIO,
    CASH_RATIO,
    INTEREST_COVERAGE,
    DEBT_TO_ASSET,
    EQUITY_RATIO,
    ROA,
    ROE,
    NET_PROFIT_MARGIN,
    OPERATING_PROFIT_MARGIN,
    TOTAL_ASSET_TURNOVER,
    REVENUE_GROWTH,
    NET_INCOME_GROWTH,
    ASSET_GROWTH,
];

/// Ratios that ship with a Z-score column, in display order.
pub const Z_SCORED: [&str; 9] = [
    ROA,
    ROE,
    CURRENT_RATIO,
    CASH_RATIO,
    INTEREST_COVERAGE,
    DEBT_TO_ASSET,
    EQUITY_RATIO,
    NET_INCOME_GROWTH,
    ASSET_GROWTH,
];

/// Name of the Z-score column for a ratio.
#[must_use]
pub fn z_column(ratio: &str) -> String {
    format!("{ratio}{Z_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_column_appends_suffix() {
        assert_eq!(z_column(ROA), "ROA_z");
        assert_eq!(z_column(DEBT_TO_ASSET), "Debt to Asset_z");
    }

    #[test]
    fn z_scored_ratios_are_ratios() {
        assert!(Z_SCORED.iter().all(|z| RATIOS.contains(z)));
    }
}
