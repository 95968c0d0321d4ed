//! Integration tests for the instrument side of the valuation contract.
//!
//! Exercises schedules, indices, legs and the basis swap together through
//! the public API only, with a toy engine standing in for pricer_pricing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::market_data::curves::FlatCurve;
use pricer_core::traits::engine::{
    share, EngineArguments, EngineResults, GenericEngine, PricingEngine,
};
use pricer_core::traits::{Instrument, Prototype};
use pricer_core::types::{Date, DayCountConvention, EvaluationDate, PricingError};
use pricer_models::indexes::IborIndex;
use pricer_models::instruments::rates::{
    BasisSwap, BasisSwapArguments, BasisSwapResults, BasisSwapType, FloatingLegTerms,
};
use pricer_models::schedules::{Frequency, ScheduleBuilder};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

/// Sums known coupon amounts with the leg sign; counts its runs.
#[derive(Debug, Default)]
struct CouponSumEngine {
    core: GenericEngine<BasisSwapArguments, BasisSwapResults>,
    runs: Arc<AtomicUsize>,
}

impl PricingEngine for CouponSumEngine {
    fn name(&self) -> &'static str {
        "CouponSumEngine"
    }
    fn arguments(&self) -> &dyn EngineArguments {
        &self.core.arguments
    }
    fn arguments_mut(&mut self) -> &mut dyn EngineArguments {
        &mut self.core.arguments
    }
    fn results(&self) -> &dyn EngineResults {
        &self.core.results
    }
    fn reset(&mut self) {
        self.core.results.reset();
    }
    fn calculate(&mut self) -> Result<(), PricingError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let args = &self.core.arguments;
        let sum = |coupons: &[Option<f64>]| -> Result<f64, PricingError> {
            coupons
                .iter()
                .map(|c| c.ok_or_else(|| PricingError::NotAvailable("coupon".to_string())))
                .sum()
        };
        let short = args.swap.payer[0] * sum(&args.short_tenor.coupons)?;
        let long = args.swap.payer[1] * sum(&args.long_tenor.coupons)?;
        let results = &mut self.core.results;
        results.swap.leg_npv = vec![Some(short), Some(long)];
        results.swap.base.value = Some(short + long);
        Ok(())
    }
}

fn build(swap_type: i32, today: Date) -> (BasisSwap, Arc<EvaluationDate>) {
    let eval = Arc::new(EvaluationDate::new(today));
    let leg = |tenor: Frequency, spread: f64| {
        let index = Arc::new(IborIndex::new(
            format!("Euribor{}", tenor.tenor_label()),
            tenor,
            2,
            DayCountConvention::ActualActual360,
            Arc::new(FlatCurve::new(0.02)),
            Arc::clone(&eval),
        ));
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 1, 15))
            .end(d(2025, 1, 15))
            .frequency(tenor)
            .build()
            .unwrap();
        FloatingLegTerms::new(schedule, index, DayCountConvention::ActualActual360, spread)
    };
    let swap = BasisSwap::new(
        BasisSwapType::try_from(swap_type).unwrap(),
        100.0,
        leg(Frequency::Quarterly, 0.0),
        leg(Frequency::SemiAnnual, 0.0),
        None,
    )
    .unwrap();
    (swap, eval)
}

#[test]
fn test_unknown_type_code_fails() {
    assert!(BasisSwapType::try_from(2).is_err());
    let err: PricingError = BasisSwapType::try_from(0).unwrap_err().into();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn test_payer_and_receiver_mirror() {
    let (mut payer, _) = build(1, d(2024, 1, 10));
    let (mut receiver, _) = build(-1, d(2024, 1, 10));
    payer.set_pricing_engine(share(CouponSumEngine::default()));
    receiver.set_pricing_engine(share(CouponSumEngine::default()));

    assert_relative_eq!(payer.npv().unwrap(), -receiver.npv().unwrap(), epsilon = 1e-12);
    assert_relative_eq!(
        payer.short_tenor_leg_npv().unwrap(),
        -receiver.short_tenor_leg_npv().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_missing_fixing_surfaces_from_engine_and_recovers() {
    let runs = Arc::new(AtomicUsize::new(0));
    let (mut swap, _) = build(1, d(2024, 2, 1));
    swap.set_pricing_engine(share(CouponSumEngine {
        runs: runs.clone(),
        ..Default::default()
    }));

    assert!(matches!(swap.npv(), Err(PricingError::NotAvailable(_))));
    assert!(!swap.cache().is_valid());

    swap.short_tenor_index().add_fixing(d(2024, 1, 11), 0.021);
    swap.long_tenor_index().add_fixing(d(2024, 1, 11), 0.022);
    let npv = swap.npv().unwrap();
    assert!(npv.is_finite());
    assert_eq!(runs.load(Ordering::SeqCst), 2);

    swap.npv().unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_reattaching_engine_invalidates() {
    let runs = Arc::new(AtomicUsize::new(0));
    let (mut swap, _) = build(1, d(2024, 1, 10));
    let engine = share(CouponSumEngine {
        runs: runs.clone(),
        ..Default::default()
    });
    swap.set_pricing_engine(engine.clone());
    swap.npv().unwrap();
    swap.set_pricing_engine(engine);
    assert!(!swap.cache().is_valid());
    swap.npv().unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_clone_independence() {
    let (mut swap, _) = build(1, d(2024, 1, 10));
    swap.set_pricing_engine(share(CouponSumEngine::default()));
    let original = swap.npv().unwrap();

    let mut copy = swap.duplicate();
    let copied = copy.npv().unwrap();
    assert_relative_eq!(original, copied, epsilon = 1e-12);

    copy.recalculate().unwrap();
    copy.cache().invalidate();
    assert!(swap.cache().is_valid());
    assert_eq!(swap.npv().unwrap(), original);
}

#[test]
fn test_no_fair_spread_without_bps() {
    let (mut swap, _) = build(1, d(2024, 1, 10));
    swap.set_pricing_engine(share(CouponSumEngine::default()));
    assert!(matches!(
        swap.short_tenor_leg_fair_spread(),
        Err(PricingError::NotAvailable(_))
    ));
}
