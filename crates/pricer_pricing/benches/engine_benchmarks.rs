//! Criterion benchmarks for pricer_pricing.
//!
//! Measures a full finite-difference rollback across grid sizes and schemes,
//! and a basis-swap valuation through the discounting engine.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::FlatCurve;
use pricer_core::traits::engine::share;
use pricer_core::traits::Instrument;
use pricer_core::types::{Date, DayCountConvention, EvaluationDate};
use pricer_models::indexes::{CurveHandle, IborIndex};
use pricer_models::instruments::equity::{
    Dividend, DividendSchedule, FdSettings, OptionParams, SingleAssetOption,
};
use pricer_models::instruments::rates::{BasisSwap, BasisSwapType, FloatingLegTerms};
use pricer_models::instruments::PayoffType;
use pricer_models::schedules::{Frequency, ScheduleBuilder};
use pricer_pricing::engines::{DiscountingBasisSwapEngine, FdDividendOptionEngine};
use pricer_pricing::fd::FdScheme;

fn bench_fd_rollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("fd_dividend_shout");
    let params = OptionParams::new(PayoffType::Call, 100.0, 100.0, 0.0, 0.05, 1.0, 0.2);
    let dividends =
        DividendSchedule::new(vec![Dividend::new(0.25, 1.5), Dividend::new(0.75, 1.5)]).unwrap();

    for points in [101usize, 201, 401] {
        for scheme in [FdScheme::Implicit, FdScheme::CrankNicolson] {
            let settings = FdSettings::new(points - 1, points);
            let engine = share(FdDividendOptionEngine::new(scheme));
            let mut option =
                SingleAssetOption::dividend_shout(params, dividends.clone(), settings).unwrap();
            option.set_pricing_engine(engine);

            group.bench_with_input(
                BenchmarkId::new(scheme.to_string(), points),
                &points,
                |b, _| b.iter(|| black_box(option.recalculate().unwrap())),
            );
        }
    }
    group.finish();
}

fn bench_basis_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("basis_swap_npv");
    let eval = Arc::new(EvaluationDate::new(Date::from_ymd(2024, 1, 10).unwrap()));
    let curve: CurveHandle = Arc::new(FlatCurve::new(0.03));

    let terms = |tenor: Frequency, years: i32, spread: f64| {
        let index = Arc::new(IborIndex::new(
            format!("Euribor{}", tenor.tenor_label()),
            tenor,
            2,
            DayCountConvention::ActualActual360,
            Arc::clone(&curve),
            Arc::clone(&eval),
        ));
        let schedule = ScheduleBuilder::new()
            .start(Date::from_ymd(2024, 1, 15).unwrap())
            .end(Date::from_ymd(2024 + years, 1, 15).unwrap())
            .frequency(tenor)
            .build()
            .unwrap();
        FloatingLegTerms::new(schedule, index, DayCountConvention::ActualActual360, spread)
    };

    for years in [5, 10, 30] {
        let mut swap = BasisSwap::new(
            BasisSwapType::Payer,
            10_000_000.0,
            terms(Frequency::Quarterly, years, 0.0010),
            terms(Frequency::SemiAnnual, years, 0.0),
            None,
        )
        .unwrap();
        swap.set_pricing_engine(share(DiscountingBasisSwapEngine::new(
            Arc::clone(&curve),
            Arc::clone(&eval),
        )));

        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, _| {
            b.iter(|| {
                swap.recalculate().unwrap();
                black_box(swap.npv().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fd_rollback, bench_basis_swap);
criterion_main!(benches);
