//! Example: Dashboard Session over In-Memory Tables
//!
//! Builds the source tables with `df!` instead of reading files, then walks
//! through the requests a dashboard makes:
//! 1. Filter options and the default selection
//! 2. KPIs and market insights of a filtered year
//! 3. Company card, rule assessment and foreign flow analysis
//!
//! Run with: `cargo run --example in_memory_session --features full`

use chrono::NaiveDate;
use healthboard::{
    dashboard::{DashboardConfig, Session, SourceRole, SourceSet},
    primitives::{FlowDirection, Ticker},
};
use polars::prelude::*;

const TICKERS: [&str; 4] = ["VCB", "HPG", "FPT", "MWG"];

fn fundamentals() -> PolarsResult<DataFrame> {
    df! {
        "Mã" => &["VCB", "HPG", "FPT", "MWG", "VCB", "HPG", "FPT", "MWG"],
        "Năm" => &[2023, 2023, 2023, 2023, 2024, 2024, 2024, 2024],
        "Tên công ty" => &["Vietcombank", "Hoa Phat", "FPT Corp", "Mobile World", "Vietcombank", "Hoa Phat", "FPT Corp", "Mobile World"],
        "Ngành" => &["Banks", "Steel", "Technology", "Retail", "Banks", "Steel", "Technology", "Retail"],
        "Health_Score" => &[78.0, 55.0, 81.0, 62.0, 80.0, 58.0, 84.0, 66.0],
        "Health_Group" => &[2, 0, 2, 1, 2, 0, 2, 1],
        "Credit_Rating_Z" => &["AA", "BB", "AAA", "BBB", "AAA", "BB", "AAA", "A"],
        "Current Ratio" => &[1.2, 0.9, 1.8, 1.1, 1.3, 0.95, 1.9, 1.2],
        "Cash Ratio" => &[0.4, 0.1, 0.6, 0.2, 0.5, 0.1, 0.7, 0.25],
        "Debt to Asset" => &[0.62, 0.55, 0.35, 0.5, 0.61, 0.58, 0.33, 0.48],
        "ROA" => &[1.8, 3.0, 11.0, 2.0, 1.9, 4.0, 12.0, 3.5],
        "ROE" => &[20.0, 8.0, 25.0, 9.0, 21.0, 10.0, 27.0, 14.0],
        "Revenue Growth" => &[12.0, -20.0, 20.0, -5.0, 10.0, 15.0, 19.0, 8.0],
        "Net Income Growth" => &[18.0, -60.0, 21.0, -90.0, 4.0, 70.0, 22.0, 300.0],
        "ROA_z" => &[-0.2, 0.1, 1.8, -0.1, -0.2, 0.3, 2.0, 0.2],
        "Health_Z" => &[0.9, -0.6, 1.7, -0.1, 1.1, -0.4, 1.9, 0.2],
    }
}

fn yearly_flows() -> PolarsResult<DataFrame> {
    df! {
        "Ticker" => &["VCB", "HPG", "FPT", "MWG", "VCB", "HPG", "FPT", "MWG"],
        "Year" => &[2023, 2023, 2023, 2023, 2024, 2024, 2024, 2024],
        "Total_Net_F_Val" => &[-2.1e11, 5.0e10, 8.4e11, -1.2e11, 3.3e11, -4.0e10, 1.1e12, 2.5e11],
        "Buy_Net_Flag" => &[0, 1, 1, 0, 1, 0, 1, 1],
        "Health_Group" => &[2, 0, 2, 1, 2, 0, 2, 1],
    }
}

/// Daily rows for every ticker over `days` calendar days from 2023-12-01.
fn daily(days: usize, value: impl Fn(usize, usize) -> f64) -> PolarsResult<DataFrame> {
    let Some(start) = NaiveDate::from_ymd_opt(2023, 12, 1) else {
        return Err(PolarsError::ComputeError("invalid start date".into()));
    };
    let mut tickers = Vec::new();
    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (t, ticker) in TICKERS.iter().enumerate() {
        for (d, date) in start.iter_days().take(days).enumerate() {
            tickers.push(*ticker);
            dates.push(date.format("%d/%m/%Y").to_string());
            values.push(value(t, d));
        }
    }
    df! { "Ticker" => tickers, "Date" => dates, "Value" => values }
}

fn renamed(df: PolarsResult<DataFrame>, value: &str) -> PolarsResult<DataFrame> {
    let mut df = df?;
    df.rename("Value", value.into())?;
    Ok(df)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Healthboard Session over In-Memory Tables ===\n");

    let sources = SourceSet::from_frames([
        (SourceRole::Fundamentals, fundamentals()?),
        (SourceRole::YearlyFlow, yearly_flows()?),
        (SourceRole::Price, renamed(daily(90, |t, d| 20.0 + 10.0 * t as f64 + (d % 7) as f64), "Giá")?),
        (SourceRole::MarketCap, renamed(daily(90, |t, _| 5.0e12 * (t + 1) as f64), "Vốn hóa")?),
        (
            SourceRole::DailyFlow,
            renamed(daily(90, |t, d| (d as f64 - 40.0) * 1.0e8 * (t as f64 - 1.5)), "Net.F_Val")?,
        ),
    ]);
    let mut session = Session::new(DashboardConfig::default(), sources);

    // =========================================================================
    // FILTER OPTIONS
    // =========================================================================

    let options = session.options()?;
    println!("Years:      {:?}", options.years);
    println!("Industries: {:?}", options.industries);
    println!("Ratings:    {:?}\n", options.ratings);
    let Some(spec) = options.default_spec() else {
        return Err("no years available".into());
    };

    // =========================================================================
    // MARKET OVERVIEW
    // =========================================================================

    let insights = session.insights(&spec, 3)?;
    let kpis = &insights.kpis;
    println!("Overview {}", spec.year);
    println!("  tickers {}, mean health {:.1}", kpis.ticker_count, kpis.avg_health_score);
    println!("  investment grade {:.0}%, net buy {:.0}%", kpis.investment_grade_pct, kpis.net_buy_pct);
    println!("  market cap {:.0} bn", kpis.market_cap_total);
    for row in &insights.suggestions {
        println!("  {}. {} {}", row.company.rank, row.company.ticker, row.investment);
    }
    if let Some(group) = insights.dominant_group {
        println!("  foreign flow concentrates on {group} companies");
    }

    let sellers = session.filter(&spec.clone().with_flow_directions([FlowDirection::NetSell]))?;
    println!("  net sold tickers: {}\n", sellers.height());

    // =========================================================================
    // COMPANY LOOKUP
    // =========================================================================

    let ticker = Ticker::new("vcb");
    if let Some(profile) = session.company(&ticker, spec.year)? {
        println!("{} ({:?}), health group {}", profile.ticker, profile.company, profile.health_group);
    }
    if let Some(report) = session.assess(&ticker, spec.year)? {
        println!("  investment: {}", report.investment);
        for line in report.narrative() {
            println!("  {line}");
        }
        for warning in &report.warnings {
            println!("  ! {warning}");
        }
        println!("  suggestion: {}", report.suggestion);
    }
    println!("  {}", session.yearly_flow(&ticker)?.narrative());
    println!("  {}", session.daily_flow(&ticker, 2024)?.narrative());

    println!(
        "\nCache: {} tables, {} hits, {} misses",
        session.cache().len(),
        session.cache().hits(),
        session.cache().misses()
    );
    Ok(())
}
