//! Benchmarks for healthboard-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use healthboard_math::{TrailingMean, mean, tail_mean};
use ndarray::Array1;
use rand::Rng;

fn random_flow(n: usize) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    Array1::from_iter((0..n).map(|_| rng.r#gen::<f64>() * 2e9 - 1e9))
}

fn bench_trailing_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("trailing_mean");

    for size in [250, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data = random_flow(size);
            let ma = TrailingMean::new(30).unwrap();
            b.iter(|| ma.apply(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

fn bench_reductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("reductions");

    for size in [1000, 100000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("mean", size), &size, |b, &size| {
            let data = random_flow(size);
            b.iter(|| mean(black_box(&data).iter().map(|&v| Some(v))));
        });
        group.bench_with_input(BenchmarkId::new("tail_mean", size), &size, |b, &size| {
            let data = random_flow(size);
            b.iter(|| tail_mean(black_box(&data), 30));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_trailing_mean, bench_reductions);
criterion_main!(benches);
