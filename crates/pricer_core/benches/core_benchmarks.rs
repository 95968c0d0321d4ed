//! Criterion benchmarks for pricer_core building blocks.
//!
//! Measures linear interpolation lookup and observer notification fan-out,
//! the two operations on the hot path of cache invalidation and grid
//! re-interpolation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
use pricer_core::traits::{Observable, ValuationCache};

fn generate_1d_data(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|&x| x.sin() + 0.5 * x * x).collect();
    (xs, ys)
}

fn bench_linear_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_interpolation");

    for size in [101, 401, 1601] {
        let (xs, ys) = generate_1d_data(size);
        let interp = LinearInterpolator::new(&xs, &ys).unwrap();
        group.bench_with_input(BenchmarkId::new("lookup_flat", size), &interp, |b, interp| {
            let test_xs: Vec<f64> = (0..100).map(|i| i as f64 / 90.0 - 0.05).collect();
            b.iter(|| {
                for &x in &test_xs {
                    black_box(interp.interpolate_flat(black_box(x)));
                }
            });
        });
    }

    group.finish();
}

fn bench_observer_notification(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer_notification");

    for count in [1, 100, 1000] {
        let source = Observable::new();
        let caches: Vec<ValuationCache> = (0..count).map(|_| ValuationCache::new()).collect();
        for cache in &caches {
            cache.register_with(&source);
        }
        group.bench_with_input(BenchmarkId::new("notify", count), &source, |b, source| {
            b.iter(|| source.notify_observers());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linear_interpolation, bench_observer_notification);
criterion_main!(benches);
