//! Command line dashboard over the healthboard data files.
//!
//! Usage: `healthboard [--data-dir DIR] [--config FILE] [--json] <COMMAND>`
//! Example: `healthboard overview --year 2024 --industry Banks --flow buy`

use std::{env, path::PathBuf, process::ExitCode};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use healthboard::{
    dashboard::{
        CompanyProfile, DashboardConfig, FlowAnalysis, MarketInsights, Session, SourceRole,
        YearlyFlow,
    },
    primitives::{FilterSpec, FlowDirection, Ticker, Year},
    rules::HealthReport,
    utils::parse_date,
};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Extra data directory, probed before the configured ones.
const DATA_DIR_ENV: &str = "HEALTHBOARD_DATA_DIR";
/// JSON configuration file.
const CONFIG_ENV: &str = "HEALTHBOARD_CONFIG";
/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "healthboard", version, about = "Financial health dashboard for listed companies")]
struct Cli {
    /// Directory holding the data files, probed first.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Market overview of one year.
    Overview {
        /// Year to show, the latest one by default.
        #[arg(long)]
        year: Option<Year>,
        /// Industry to keep; repeat for several.
        #[arg(long = "industry")]
        industries: Vec<String>,
        /// Rating to keep; repeat for several.
        #[arg(long = "rating")]
        ratings: Vec<String>,
        /// Flow direction to keep, `buy` or `sell`; repeat for both.
        #[arg(long = "flow")]
        flows: Vec<FlowDirection>,
        /// Rows of the top companies table, 0 to hide it.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Detailed view of one company.
    Company {
        /// Ticker symbol.
        ticker: String,
        /// Year to show, the latest one by default.
        #[arg(long)]
        year: Option<Year>,
        /// First day of the daily series.
        #[arg(long, value_parser = day)]
        from: Option<NaiveDate>,
        /// Last day of the daily series.
        #[arg(long, value_parser = day)]
        to: Option<NaiveDate>,
    },
    /// Years, industries and ratings available for filtering.
    Options,
}

fn day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date `{raw}`"))
}

/// Everything shown for one company.
#[derive(Debug, Serialize)]
struct CompanyReport {
    ticker: Ticker,
    year: Year,
    profile: Option<CompanyProfile>,
    assessment: Option<HealthReport>,
    yearly_flow: YearlyFlow,
    daily_flow: FlowAnalysis,
    series_rows: Vec<(String, usize)>,
    statement_rows: usize,
    #[serde(skip)]
    statements: DataFrame,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> CliResult<DashboardConfig> {
    let path = cli.config.clone().or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    let mut config = match path {
        Some(path) => DashboardConfig::from_json_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        config = config.with_data_dir(dir);
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    debug!(dirs = ?config.data_dirs, "resolved data directories");
    Ok(config)
}

fn run(cli: &Cli) -> CliResult<()> {
    let mut session = Session::open(load_config(cli)?)?;
    let options = session.options()?;
    let year_or_latest = |year: Option<Year>| {
        year.or(options.default_year).ok_or("the fundamentals table has no years")
    };

    match &cli.command {
        Command::Options => {
            if cli.json {
                print_json(&options)?;
            } else {
                println!("Years:      {}", join(&options.years));
                println!("Industries: {}", options.industries.join(", "));
                println!("Ratings:    {}", options.ratings.join(", "));
            }
        }
        Command::Overview { year, industries, ratings, flows, top } => {
            let year = year_or_latest(*year)?;
            let mut spec = FilterSpec::for_year(year)
                .with_industries(industries.iter().cloned())
                .with_ratings(ratings.iter().cloned());
            if !flows.is_empty() {
                spec = spec.with_flow_directions(flows.iter().copied());
            }
            info!(?spec, "market overview");
            let insights = session.insights(&spec, *top)?;
            if cli.json {
                print_json(&insights)?;
            } else {
                print_overview(year, &insights);
            }
        }
        Command::Company { ticker, year, from, to } => {
            let year = year_or_latest(*year)?;
            let report = company_report(&mut session, &Ticker::new(ticker), year, *from, *to)?;
            if cli.json {
                print_json(&report)?;
            } else {
                print_company(&report);
            }
        }
    }
    Ok(())
}

fn company_report(
    session: &mut Session,
    ticker: &Ticker,
    year: Year,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> CliResult<CompanyReport> {
    let mut series_rows = Vec::new();
    for role in [SourceRole::Price, SourceRole::Volume, SourceRole::MarketCap] {
        let rows = session.series(role, ticker, from, to)?.height();
        series_rows.push((role.to_string(), rows));
    }
    let statements = session.statements(ticker)?;
    Ok(CompanyReport {
        ticker: ticker.clone(),
        year,
        profile: session.company(ticker, year)?,
        assessment: session.assess(ticker, year)?,
        yearly_flow: session.yearly_flow(ticker)?,
        daily_flow: session.daily_flow(ticker, year)?,
        series_rows,
        statement_rows: statements.height(),
        statements,
    })
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn join<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn figure(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn print_overview(year: Year, insights: &MarketInsights) {
    let kpis = &insights.kpis;
    println!("Market overview {year}");
    println!("  Tickers:             {}", kpis.ticker_count);
    println!("  Mean health score:   {:.2}", kpis.avg_health_score);
    println!("  Investment grade:    {:.1}%", kpis.investment_grade_pct);
    println!("  Foreign net buy:     {:.1}%", kpis.net_buy_pct);
    println!("  Market cap (bn):     {:.2}", kpis.market_cap_total);
    println!(
        "  Price avg/max/min:   {} / {} / {}",
        figure(kpis.avg_price),
        figure(kpis.max_price),
        figure(kpis.min_price)
    );

    println!("\nRatings");
    for row in &insights.ratings {
        println!("  {:<6} {}", row.rating, row.count);
    }

    println!("\nIndustry health");
    for row in &insights.industry_health {
        println!("  {:<32} {:>6.2}  ({} companies)", row.industry, row.avg_health_score, row.companies);
    }

    println!("\nIndustry by rating");
    for row in &insights.industry_ratings {
        println!("  {:<32} {:<6} {}", row.industry, row.rating, row.count);
    }

    println!("\nForeign flow by health group");
    for row in &insights.flow_by_group {
        println!("  {:<14} {:>20.0}", row.group.to_string(), row.total_net_flow);
    }
    if let Some(group) = insights.dominant_group {
        println!("  Foreign investors concentrate on {group} companies.");
    }

    if !insights.top.is_empty() {
        println!("\nTop {} by health score", insights.top.len());
        for row in &insights.top {
            println!(
                "  {:>3}. {:<6} {:<32} {:>7} {:<5} {}",
                row.rank,
                row.ticker,
                text(row.industry.as_deref()),
                figure(row.health_score),
                text(row.credit_rating.as_deref()),
                row.flow.map_or_else(|| "-".to_string(), |f| f.to_string()),
            );
        }
    }

    println!("\nSuggestions");
    for row in &insights.suggestions {
        println!(
            "  {:>3}. {:<6} {:>7} {:<5} {}",
            row.company.rank,
            row.company.ticker,
            figure(row.company.health_score),
            text(row.company.credit_rating.as_deref()),
            row.investment,
        );
    }
}

fn print_company(report: &CompanyReport) {
    let Some(profile) = &report.profile else {
        println!("No data for {} in {}.", report.ticker, report.year);
        return;
    };
    println!("{} {} ({})", profile.ticker, text(profile.company.as_deref()), profile.year);
    println!("  Industry:        {}", text(profile.industry.as_deref()));
    println!(
        "  Health score:    {} ({}, {})",
        figure(profile.health_score),
        profile.health_group,
        text(profile.health_label.as_deref())
    );
    println!("  Credit rating:   {}", text(profile.credit_rating.as_deref()));
    println!(
        "  Price avg/max/min: {} / {} / {}",
        figure(profile.avg_price),
        figure(profile.max_price),
        figure(profile.min_price)
    );
    println!("  Avg market cap:  {}", figure(profile.avg_market_cap));
    println!(
        "  Foreign flow:    {} ({})",
        figure(profile.total_net_flow),
        profile.flow.map_or_else(|| "-".to_string(), |f| f.to_string())
    );

    if let Some(assessment) = &report.assessment {
        println!("\nAssessment: {}", assessment.investment);
        for line in assessment.narrative() {
            println!("  {line}");
        }
        for warning in &assessment.warnings {
            println!("  ! {warning}");
        }
        println!("  Suggestion: {}", assessment.suggestion);
        for reading in &assessment.z_scores {
            println!("    {:<26} {:>7.2}  {}", reading.metric, reading.z, reading.band);
        }
    }

    println!("\n{}", report.yearly_flow.narrative());
    println!("{}", report.daily_flow.narrative());

    println!("\nDaily series");
    for (role, rows) in &report.series_rows {
        println!("  {role:<12} {rows} rows");
    }

    if report.statement_rows > 0 {
        println!("\nStatements\n{}", report.statements);
    }
}
