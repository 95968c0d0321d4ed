//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable via absolute paths
//! and that the re-exports line up with their defining modules.

use std::sync::Arc;

#[test]
fn test_types_module_exports() {
    use pricer_core::types::{
        BusinessDayConvention, Date, DayCountConvention, EvaluationDate, PricingError,
        BASIS_POINT,
    };

    let date = Date::from_ymd(2024, 3, 15).unwrap();
    let eval = EvaluationDate::new(date);
    assert_eq!(eval.get(), date);
    assert_eq!(BASIS_POINT, 1.0e-4);
    assert_eq!(DayCountConvention::ActualActual360.name(), "ACT/360");
    assert_eq!(BusinessDayConvention::Following.adjust(date).unwrap(), date);

    let err: PricingError = pricer_core::types::DateError::ParseError("x".into()).into();
    assert!(matches!(err, PricingError::InvalidInput(_)));
}

#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::{
        Float, Instrument, InstrumentResults, Observable, Observer, PricingEngine, Prototype,
        SharedEngine, ValuationCache,
    };

    fn generic_sqrt<T: Float>(x: T) -> T {
        x.sqrt()
    }
    assert_eq!(generic_sqrt(9.0_f64), 3.0);

    let cache = ValuationCache::new();
    let source = Observable::new();
    cache.register_with(&source);
    assert_eq!(source.observer_count(), 1);
    cache.mark_valid();
    source.notify_observers();
    assert!(!cache.is_valid());

    let observer: Arc<dyn Observer> = cache.observer();
    drop(observer);
    assert_eq!(InstrumentResults::default().value, None);

    // Trait objects must be nameable from outside the crate.
    fn _engine_is_object_safe(_: &SharedEngine, _: &dyn PricingEngine) {}
    fn _instrument_is_usable<I: Instrument + Prototype>(_: &I) {}
}

#[test]
fn test_market_data_module_exports() {
    use pricer_core::market_data::{
        CurveInterpolation, FlatCurve, InterpolatedCurve, MarketDataError, YieldCurve,
    };

    let flat = FlatCurve::new(0.01_f64);
    let pillars =
        InterpolatedCurve::new(&[1.0, 2.0], &[0.01, 0.01], CurveInterpolation::Linear).unwrap();
    let t = 1.5;
    assert!((flat.discount_factor(t).unwrap() - pillars.discount_factor(t).unwrap()).abs() < 1e-14);
    assert!(matches!(
        flat.discount_factor(-1.0),
        Err(MarketDataError::InvalidMaturity { .. })
    ));
}
