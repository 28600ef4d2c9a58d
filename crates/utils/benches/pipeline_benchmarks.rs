//! Benchmarks for the healthboard-utils normalize, aggregate and join stages.
#![allow(missing_docs)]

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use healthboard_primitives::columns::{HEALTH_SCORE, TICKER, YEAR};
use healthboard_utils::{build_master, normalize, yearly_price_stats};
use polars::prelude::*;
use rand::Rng;

fn raw_daily_prices(n_tickers: usize, n_days: usize) -> DataFrame {
    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default();
    let mut tickers = Vec::with_capacity(n_tickers * n_days);
    let mut dates = Vec::with_capacity(n_tickers * n_days);
    let mut prices = Vec::with_capacity(n_tickers * n_days);
    for t in 0..n_tickers {
        for d in 0..n_days {
            tickers.push(format!("T{t:04}"));
            dates.push((start + Duration::days(d as i64)).format("%d/%m/%Y").to_string());
            prices.push(rng.r#gen::<f64>() * 100.0 + 1.0);
        }
    }
    DataFrame::new(vec![
        Column::new("Mã".into(), tickers),
        Column::new("Ngày".into(), dates),
        Column::new("Giá".into(), prices),
    ])
    .unwrap()
}

fn fundamentals(n_tickers: usize) -> DataFrame {
    let mut rng = rand::thread_rng();
    let mut tickers = Vec::new();
    let mut years = Vec::new();
    let mut scores = Vec::new();
    for t in 0..n_tickers {
        for year in 2021..=2024 {
            tickers.push(format!("T{t:04}"));
            years.push(year);
            scores.push(rng.r#gen::<f64>() * 100.0);
        }
    }
    DataFrame::new(vec![
        Column::new(TICKER.into(), tickers),
        Column::new(YEAR.into(), years),
        Column::new(HEALTH_SCORE.into(), scores),
    ])
    .unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.sample_size(20);

    for n_tickers in [10, 100] {
        let raw = raw_daily_prices(n_tickers, 1000);
        group.throughput(Throughput::Elements(raw.height() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_tickers), &raw, |b, raw| {
            b.iter(|| normalize(black_box(raw)).unwrap());
        });
    }

    group.finish();
}

fn bench_aggregate_and_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_and_join");
    group.sample_size(20);

    for n_tickers in [10, 100] {
        let daily = normalize(&raw_daily_prices(n_tickers, 1000)).unwrap();
        let anchor = fundamentals(n_tickers);
        group.throughput(Throughput::Elements(daily.height() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_tickers), &daily, |b, daily| {
            b.iter(|| {
                let yearly = yearly_price_stats(black_box(daily)).unwrap();
                build_master(&anchor, &[&yearly]).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_aggregate_and_join);
criterion_main!(benches);
