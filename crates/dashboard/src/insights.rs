//! Market-wide breakdowns of a filtered subset.

use healthboard_primitives::{
    FlowDirection, HealthGroup, Ticker,
    columns::{
        BUY_NET_FLAG, COMPANY, CREDIT_RATING, HEALTH_GROUP, HEALTH_SCORE, INDUSTRY, TICKER,
        TOTAL_NET_FLOW,
    },
};
use healthboard_rules::{INVESTMENT, InvestmentCall};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    DashboardError, KpiConfig, MarketKpis, snapshot_of, top_by_health,
    frame::{f64_values, i32_values, str_values},
};

const COUNT: &str = "count";
const COMPANIES: &str = "companies";

/// Rows per rating category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    /// Rating category.
    pub rating: String,
    /// Number of rows.
    pub count: usize,
}

/// Mean health score of one industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryHealth {
    /// Industry.
    pub industry: String,
    /// Mean health score.
    pub avg_health_score: f64,
    /// Distinct tickers in the industry.
    pub companies: usize,
}

/// Rows per (industry, rating) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryRating {
    /// Industry.
    pub industry: String,
    /// Rating category.
    pub rating: String,
    /// Number of rows.
    pub count: usize,
}

/// Summed yearly net flow of one health group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowByGroup {
    /// Health group.
    pub group: HealthGroup,
    /// Summed net flow.
    pub total_net_flow: f64,
}

/// One row of the top-N table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCompany {
    /// Position, starting at 1.
    pub rank: usize,
    /// Ticker.
    pub ticker: Ticker,
    /// Company name.
    pub company: Option<String>,
    /// Industry.
    pub industry: Option<String>,
    /// Health score.
    pub health_score: Option<f64>,
    /// Credit rating.
    pub credit_rating: Option<String>,
    /// Yearly flow direction.
    pub flow: Option<FlowDirection>,
}

/// A ranked company with its investment call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRow {
    /// Ranked company.
    #[serde(flatten)]
    pub company: RankedCompany,
    /// Investment call for the row.
    pub investment: InvestmentCall,
}

fn counts(df: &DataFrame, keys: &[&str]) -> PolarsResult<DataFrame> {
    let present = keys.iter().fold(lit(true), |acc, k| acc.and(col(*k).is_not_null()));
    let by: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    df.clone()
        .lazy()
        .filter(present)
        .group_by(by)
        .agg([len().alias(COUNT)])
        .collect()
}

fn count_values(df: &DataFrame) -> PolarsResult<Vec<usize>> {
    Ok(i32_values(df, COUNT)?.into_iter().map(|c| c.map_or(0, |c| c as usize)).collect())
}

/// Rows per rating, most frequent first. Unrated rows are left out.
///
/// # Errors
/// Returns `PolarsError` if the rating column cannot be grouped.
pub(crate) fn rating_distribution(subset: &DataFrame) -> PolarsResult<Vec<RatingCount>> {
    if subset.column(CREDIT_RATING).is_err() {
        return Ok(Vec::new());
    }
    let grouped = counts(subset, &[CREDIT_RATING])?;
    let mut rows: Vec<RatingCount> = str_values(&grouped, CREDIT_RATING)?
        .into_iter()
        .zip(count_values(&grouped)?)
        .filter_map(|(rating, count)| Some(RatingCount { rating: rating?, count }))
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.rating.cmp(&b.rating)));
    Ok(rows)
}

/// Mean health score per industry, healthiest first.
pub(crate) fn industry_health(subset: &DataFrame) -> PolarsResult<Vec<IndustryHealth>> {
    if subset.column(INDUSTRY).is_err() || subset.column(HEALTH_SCORE).is_err() {
        return Ok(Vec::new());
    }
    let companies = if subset.column(TICKER).is_ok() { col(TICKER).n_unique() } else { len() };
    let grouped = subset
        .clone()
        .lazy()
        .filter(col(INDUSTRY).is_not_null())
        .group_by([col(INDUSTRY)])
        .agg([col(HEALTH_SCORE).mean(), companies.alias(COMPANIES)])
        .filter(col(HEALTH_SCORE).is_not_null())
        .collect()?;

    let sizes: Vec<Option<i32>> = i32_values(&grouped, COMPANIES)?;
    let mut rows: Vec<IndustryHealth> = str_values(&grouped, INDUSTRY)?
        .into_iter()
        .zip(f64_values(&grouped, HEALTH_SCORE)?)
        .zip(sizes)
        .filter_map(|((industry, score), size)| {
            Some(IndustryHealth {
                industry: industry?,
                avg_health_score: score?,
                companies: size.map_or(0, |s| s as usize),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        b.avg_health_score
            .total_cmp(&a.avg_health_score)
            .then_with(|| a.industry.cmp(&b.industry))
    });
    Ok(rows)
}

/// Rows per (industry, rating), sorted by industry then rating.
pub(crate) fn industry_ratings(subset: &DataFrame) -> PolarsResult<Vec<IndustryRating>> {
    if subset.column(INDUSTRY).is_err() || subset.column(CREDIT_RATING).is_err() {
        return Ok(Vec::new());
    }
    let grouped = counts(subset, &[INDUSTRY, CREDIT_RATING])?;
    let mut rows: Vec<IndustryRating> = str_values(&grouped, INDUSTRY)?
        .into_iter()
        .zip(str_values(&grouped, CREDIT_RATING)?)
        .zip(count_values(&grouped)?)
        .filter_map(|((industry, rating), count)| {
            Some(IndustryRating { industry: industry?, rating: rating?, count })
        })
        .collect();
    rows.sort_by(|a, b| a.industry.cmp(&b.industry).then_with(|| a.rating.cmp(&b.rating)));
    Ok(rows)
}

/// Summed yearly net flow per health group, in group order.
///
/// Rows without a group are left out.
pub(crate) fn flow_by_group(flows: &DataFrame) -> PolarsResult<Vec<FlowByGroup>> {
    if flows.column(HEALTH_GROUP).is_err() || flows.column(TOTAL_NET_FLOW).is_err() {
        return Ok(Vec::new());
    }
    let grouped = flows
        .clone()
        .lazy()
        .filter(col(HEALTH_GROUP).is_not_null())
        .group_by([col(HEALTH_GROUP)])
        .agg([col(TOTAL_NET_FLOW).cast(DataType::Float64).sum()])
        .collect()?;
    let mut rows: Vec<FlowByGroup> = i32_values(&grouped, HEALTH_GROUP)?
        .into_iter()
        .zip(f64_values(&grouped, TOTAL_NET_FLOW)?)
        .map(|(code, total)| FlowByGroup {
            group: HealthGroup::from_code(code),
            total_net_flow: total.unwrap_or(0.0),
        })
        .collect();
    rows.sort_by_key(|row| row.group);
    Ok(rows)
}

/// Group whose summed flow is largest in magnitude; the first one wins ties.
#[must_use]
pub(crate) fn dominant_group(groups: &[FlowByGroup]) -> Option<HealthGroup> {
    groups
        .iter()
        .fold(None::<&FlowByGroup>, |best, row| match best {
            Some(b) if b.total_net_flow.abs() >= row.total_net_flow.abs() => Some(b),
            _ => Some(row),
        })
        .map(|row| row.group)
}

/// Ranked rows of an already sorted frame with their row index.
///
/// Rows without a ticker are skipped and do not take a rank.
fn ranked_rows(top: &DataFrame) -> PolarsResult<Vec<(usize, RankedCompany)>> {
    let tickers = str_values(top, TICKER)?;
    let companies = str_values(top, COMPANY)?;
    let industries = str_values(top, INDUSTRY)?;
    let scores = f64_values(top, HEALTH_SCORE)?;
    let ratings = str_values(top, CREDIT_RATING)?;
    let flags = i32_values(top, BUY_NET_FLAG)?;

    Ok(tickers
        .iter()
        .enumerate()
        .filter_map(|(i, ticker)| ticker.as_deref().map(|t| (i, Ticker::new(t))))
        .enumerate()
        .map(|(rank, (i, ticker))| {
            let company = RankedCompany {
                rank: rank + 1,
                ticker,
                company: companies[i].clone(),
                industry: industries[i].clone(),
                health_score: scores[i],
                credit_rating: ratings[i].clone(),
                flow: flags[i].and_then(FlowDirection::from_flag),
            };
            (i, company)
        })
        .collect())
}

/// The `n` healthiest rows of a subset as ranked companies.
///
/// # Errors
/// Returns `DashboardError` if the subset cannot be ranked.
pub(crate) fn ranked(subset: &DataFrame, n: usize) -> Result<Vec<RankedCompany>, DashboardError> {
    if n == 0 || subset.column(HEALTH_SCORE).is_err() {
        return Ok(Vec::new());
    }
    let top = top_by_health(subset, n)?;
    Ok(ranked_rows(&top)?.into_iter().map(|(_, company)| company).collect())
}

/// The `n` healthiest rows with their investment call.
pub(crate) fn suggestions(
    subset: &DataFrame,
    n: usize,
) -> Result<Vec<SuggestionRow>, DashboardError> {
    if n == 0 || subset.column(HEALTH_SCORE).is_err() {
        return Ok(Vec::new());
    }
    let top = top_by_health(subset, n)?;
    let mut rows = Vec::with_capacity(top.height());
    for (i, company) in ranked_rows(&top)? {
        let snapshot = snapshot_of(&top, i)?;
        rows.push(SuggestionRow { company, investment: INVESTMENT.evaluate(&snapshot) });
    }
    Ok(rows)
}

/// Every breakdown shown on the market overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketInsights {
    /// Headline KPIs.
    pub kpis: MarketKpis,
    /// Rating distribution.
    pub ratings: Vec<RatingCount>,
    /// Industry health ranking.
    pub industry_health: Vec<IndustryHealth>,
    /// Industry by rating counts.
    pub industry_ratings: Vec<IndustryRating>,
    /// Yearly flow per health group, over the whole flow table.
    pub flow_by_group: Vec<FlowByGroup>,
    /// Group attracting the largest absolute flow.
    pub dominant_group: Option<HealthGroup>,
    /// Top-N table; empty when N is zero.
    pub top: Vec<RankedCompany>,
    /// Suggestion table.
    pub suggestions: Vec<SuggestionRow>,
}

impl MarketInsights {
    /// Compute the overview of a filtered subset.
    ///
    /// # Arguments
    /// * `subset` - Filtered master rows
    /// * `flows` - Full normalized yearly flow table
    /// * `top_n` - Rows of the top-N table, 0 to disable it
    /// * `suggestion_rows` - Rows of the suggestion table
    /// * `kpi` - KPI settings
    ///
    /// # Errors
    /// Returns `DashboardError` if a breakdown cannot be computed.
    pub fn compute(
        subset: &DataFrame,
        flows: &DataFrame,
        top_n: usize,
        suggestion_rows: usize,
        kpi: &KpiConfig,
    ) -> Result<Self, DashboardError> {
        let flow_by_group = flow_by_group(flows)?;
        let insights = Self {
            kpis: MarketKpis::compute(subset, kpi)?,
            ratings: rating_distribution(subset)?,
            industry_health: industry_health(subset)?,
            industry_ratings: industry_ratings(subset)?,
            dominant_group: dominant_group(&flow_by_group),
            flow_by_group,
            top: ranked(subset, top_n)?,
            suggestions: suggestions(subset, suggestion_rows)?,
        };
        debug!(rows = subset.height(), "computed market insights");
        Ok(insights)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use healthboard_primitives::columns::YEAR;

    use super::*;

    fn subset() -> DataFrame {
        df! {
            TICKER => &["AAA", "BBB", "CCC", "DDD", "EEE"],
            YEAR => &[2024; 5],
            INDUSTRY => &[Some("Banks"), Some("Banks"), Some("Steel"), None, Some("Steel")],
            CREDIT_RATING => &[Some("AAA"), Some("A"), Some("A"), Some("BB"), None],
            HEALTH_SCORE => &[Some(80.0), Some(66.0), Some(50.0), Some(90.0), None],
            BUY_NET_FLAG => &[Some(1), Some(1), Some(0), Some(0), Some(1)],
        }
        .unwrap()
    }

    fn flows() -> DataFrame {
        df! {
            TICKER => &["AAA", "BBB", "CCC", "DDD"],
            HEALTH_GROUP => &[Some(2), Some(2), Some(0), None],
            TOTAL_NET_FLOW => &[Some(100.0), Some(-20.0), Some(-150.0), Some(5.0)],
        }
        .unwrap()
    }

    #[test]
    fn ratings_by_frequency() {
        let ratings = rating_distribution(&subset()).unwrap();
        assert_eq!(
            ratings,
            vec![
                RatingCount { rating: "A".into(), count: 2 },
                RatingCount { rating: "AAA".into(), count: 1 },
                RatingCount { rating: "BB".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn industries_by_health() {
        let health = industry_health(&subset()).unwrap();
        assert_eq!(health.len(), 2);
        assert_eq!(health[0].industry, "Banks");
        assert_relative_eq!(health[0].avg_health_score, 73.0);
        assert_eq!(health[0].companies, 2);
        assert_relative_eq!(health[1].avg_health_score, 50.0);

        let pairs = industry_ratings(&subset()).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].industry.as_str(), pairs[0].rating.as_str()), ("Banks", "A"));
    }

    #[test]
    fn flow_groups_and_dominant() {
        let groups = flow_by_group(&flows()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, HealthGroup::Weak);
        assert_relative_eq!(groups[0].total_net_flow, -150.0);
        assert_relative_eq!(groups[1].total_net_flow, 80.0);
        assert!(groups.iter().all(|g| g.group != HealthGroup::Undetermined));
        assert_eq!(dominant_group(&groups), Some(HealthGroup::Weak));
        assert_eq!(dominant_group(&[]), None);
    }

    #[test]
    fn suggestions_carry_investment_call() {
        let rows = suggestions(&subset(), 3).unwrap();
        let tickers: Vec<&str> = rows.iter().map(|r| r.company.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["DDD", "AAA", "BBB"]);
        assert_eq!(rows[0].investment, InvestmentCall::AverageWatch);
        assert_eq!(rows[1].investment, InvestmentCall::StrongFollow);
        assert_eq!(rows[2].investment, InvestmentCall::GoodPotential);
        assert_eq!(rows[2].company.rank, 3);
    }

    #[test]
    fn overview() {
        let insights =
            MarketInsights::compute(&subset(), &flows(), 0, 20, &KpiConfig::default()).unwrap();
        assert!(insights.top.is_empty());
        assert_eq!(insights.suggestions.len(), 5);
        assert_eq!(insights.suggestions[4].company.ticker.as_str(), "EEE");
        assert_eq!(insights.kpis.ticker_count, 5);
    }
}
