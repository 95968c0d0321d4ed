//! Floating/floating basis swap.
//!
//! Two Ibor legs on different tenors (e.g. 3M vs 6M) with a spread on each.
//! The swap exchanges the short-tenor leg against the long-tenor leg; the
//! [`BasisSwapType`] decides which one is paid.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use pricer_core::traits::engine::{EngineArguments, EngineResults, InstrumentResults, SharedEngine};
use pricer_core::traits::{Instrument, Prototype, ValuationCache};
use pricer_core::types::time::{BusinessDayConvention, Date, DayCountConvention};
use pricer_core::types::{PricingError, BASIS_POINT};
use tracing::debug;

use super::swap::{Swap, SwapArguments, SwapResults};
use crate::cashflows::{IborLeg, Leg};
use crate::indexes::IborIndex;
use crate::instruments::error::InstrumentError;
use crate::schedules::Schedule;

const SHORT: usize = 0;
const LONG: usize = 1;

/// Which leg the holder pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BasisSwapType {
    /// Pays the short-tenor leg, receives the long-tenor leg.
    Payer,
    /// Receives the short-tenor leg, pays the long-tenor leg.
    Receiver,
}

impl BasisSwapType {
    /// Multiplier of the short-tenor leg cash flows.
    ///
    /// - Payer: -1 (negative = pay)
    /// - Receiver: +1 (positive = receive)
    #[inline]
    pub fn short_tenor_multiplier(&self) -> f64 {
        match self {
            BasisSwapType::Payer => -1.0,
            BasisSwapType::Receiver => 1.0,
        }
    }

    /// Multiplier of the long-tenor leg cash flows.
    #[inline]
    pub fn long_tenor_multiplier(&self) -> f64 {
        -self.short_tenor_multiplier()
    }
}

impl TryFrom<i32> for BasisSwapType {
    type Error = InstrumentError;

    /// `1` is Payer, `-1` is Receiver.
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(BasisSwapType::Payer),
            -1 => Ok(BasisSwapType::Receiver),
            _ => Err(InstrumentError::UnknownSwapType { code }),
        }
    }
}

impl fmt::Display for BasisSwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisSwapType::Payer => write!(f, "Payer"),
            BasisSwapType::Receiver => write!(f, "Receiver"),
        }
    }
}

/// Contractual terms of one floating leg.
#[derive(Debug, Clone)]
pub struct FloatingLegTerms {
    /// Accrual schedule.
    pub schedule: Schedule,
    /// Index fixing each coupon.
    pub index: Arc<IborIndex>,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Spread over the index.
    pub spread: f64,
}

impl FloatingLegTerms {
    /// Bundles the terms of one leg.
    pub fn new(
        schedule: Schedule,
        index: Arc<IborIndex>,
        day_count: DayCountConvention,
        spread: f64,
    ) -> Self {
        Self {
            schedule,
            index,
            day_count,
            spread,
        }
    }
}

/// Coupon data of one leg as parallel arrays, one entry per coupon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegArguments {
    /// Accrual start of each coupon.
    pub reset_dates: Vec<Date>,
    /// Payment date of each coupon.
    pub pay_dates: Vec<Date>,
    /// Index fixing date of each coupon.
    pub fixing_dates: Vec<Date>,
    /// Accrual year fraction of each coupon.
    pub accrual_times: Vec<f64>,
    /// Spread of each coupon.
    pub spreads: Vec<f64>,
    /// Coupon amount, `None` when it cannot be determined yet.
    pub coupons: Vec<Option<f64>>,
}

impl LegArguments {
    /// Extracts the arrays from `leg`.
    pub fn from_leg(leg: &Leg) -> Self {
        let mut args = Self::default();
        for coupon in leg {
            args.reset_dates.push(coupon.accrual_start_date());
            args.pay_dates.push(coupon.date());
            args.fixing_dates.push(coupon.fixing_date());
            args.accrual_times.push(coupon.accrual_period());
            args.spreads.push(coupon.spread());
            args.coupons.push(match coupon.amount() {
                Ok(amount) => Some(amount),
                Err(e) => {
                    debug!(fixing_date = %coupon.fixing_date(), error = %e, "coupon amount unknown");
                    None
                }
            });
        }
        args
    }

    /// Number of coupons.
    pub fn len(&self) -> usize {
        self.pay_dates.len()
    }

    /// Whether the leg has no coupons.
    pub fn is_empty(&self) -> bool {
        self.pay_dates.is_empty()
    }

    fn validate(&self, side: &str) -> Result<(), PricingError> {
        let pay = self.pay_dates.len();
        for (what, len) in [
            ("start dates", self.reset_dates.len()),
            ("fixing dates", self.fixing_dates.len()),
            ("accrual Times", self.accrual_times.len()),
            ("spreads", self.spreads.len()),
        ] {
            if len != pay {
                return Err(PricingError::InvalidInput(format!(
                    "number of {side} tenor leg {what} different from number of {side} tenor leg payment dates"
                )));
            }
        }
        if pay != self.coupons.len() {
            return Err(PricingError::InvalidInput(format!(
                "number of {side} tenor leg payment dates different from number of {side} tenor leg coupon amounts"
            )));
        }
        Ok(())
    }
}

/// Arguments understood by basis-swap engines.
///
/// Extends [`SwapArguments`] with per-coupon arrays for both legs.
#[derive(Debug, Clone, Default)]
pub struct BasisSwapArguments {
    /// Legs and multipliers, for engines that only need the cash flows.
    pub swap: SwapArguments,
    /// Payer or receiver.
    pub swap_type: Option<BasisSwapType>,
    /// Nominal of both legs.
    pub nominal: Option<f64>,
    /// Short-tenor leg arrays.
    pub short_tenor: LegArguments,
    /// Long-tenor leg arrays.
    pub long_tenor: LegArguments,
}

impl EngineArguments for BasisSwapArguments {
    fn validate(&self) -> Result<(), PricingError> {
        self.swap.validate()?;
        if self.nominal.is_none() {
            return Err(PricingError::InvalidInput("nominal null or not set".to_string()));
        }
        self.short_tenor.validate("shorter")?;
        self.long_tenor.validate("longer")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Outputs of basis-swap engines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasisSwapResults {
    /// NPV, leg NPVs and leg BPS.
    pub swap: SwapResults,
    /// Short-tenor spread that zeroes the NPV.
    pub short_tenor_leg_fair_spread: Option<f64>,
    /// Long-tenor spread that zeroes the NPV.
    pub long_tenor_leg_fair_spread: Option<f64>,
}

impl EngineResults for BasisSwapResults {
    fn reset(&mut self) {
        self.swap.reset();
        self.short_tenor_leg_fair_spread = None;
        self.long_tenor_leg_fair_spread = None;
    }

    fn base(&self) -> &InstrumentResults {
        &self.swap.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// First-order spread making the swap NPV zero.
///
/// `spread - npv / (bps / BASIS_POINT)`. Exact when the NPV is linear in the
/// leg spread, an approximation otherwise. `None` when either input is
/// missing or the BPS is zero.
///
/// # Examples
/// ```
/// use pricer_models::instruments::rates::implied_fair_spread;
///
/// let fair = implied_fair_spread(0.001, Some(500.0), Some(200_000.0)).unwrap();
/// assert!((fair - 0.00075).abs() < 1e-15);
/// assert_eq!(implied_fair_spread(0.001, Some(500.0), None), None);
/// ```
pub fn implied_fair_spread(spread: f64, npv: Option<f64>, bps: Option<f64>) -> Option<f64> {
    match (npv, bps) {
        (Some(npv), Some(bps)) if bps != 0.0 => Some(spread - npv / (bps / BASIS_POINT)),
        _ => None,
    }
}

/// Floating/floating swap between a short-tenor and a long-tenor Ibor leg.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::traits::Instrument;
/// use pricer_core::types::{Date, DayCountConvention, EvaluationDate};
/// use pricer_models::indexes::IborIndex;
/// use pricer_models::instruments::rates::{BasisSwap, BasisSwapType, FloatingLegTerms};
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
///
/// let today = Arc::new(EvaluationDate::new(Date::from_ymd(2024, 1, 10).unwrap()));
/// let curve = Arc::new(FlatCurve::new(0.03));
/// let index = |name: &str, tenor| {
///     Arc::new(IborIndex::new(
///         name, tenor, 2, DayCountConvention::ActualActual360,
///         curve.clone(), today.clone(),
///     ))
/// };
/// let schedule = |tenor| {
///     ScheduleBuilder::new()
///         .start(Date::from_ymd(2024, 1, 15).unwrap())
///         .end(Date::from_ymd(2026, 1, 15).unwrap())
///         .frequency(tenor)
///         .build()
///         .unwrap()
/// };
///
/// let mut swap = BasisSwap::new(
///     BasisSwapType::Payer,
///     1_000_000.0,
///     FloatingLegTerms::new(
///         schedule(Frequency::Quarterly),
///         index("Euribor3M", Frequency::Quarterly),
///         DayCountConvention::ActualActual360,
///         0.0010,
///     ),
///     FloatingLegTerms::new(
///         schedule(Frequency::SemiAnnual),
///         index("Euribor6M", Frequency::SemiAnnual),
///         DayCountConvention::ActualActual360,
///         0.0,
///     ),
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(swap.short_tenor_leg().len(), 8);
/// assert_eq!(swap.long_tenor_leg().len(), 4);
/// assert!(swap.npv().is_err()); // no engine attached
/// ```
#[derive(Debug)]
pub struct BasisSwap {
    swap_type: BasisSwapType,
    nominal: f64,
    short_tenor: FloatingLegTerms,
    long_tenor: FloatingLegTerms,
    payment_convention: BusinessDayConvention,
    swap: Swap,
    short_tenor_fair_spread: Option<f64>,
    long_tenor_fair_spread: Option<f64>,
}

impl BasisSwap {
    /// Builds both legs and subscribes to their indices and the evaluation
    /// date of the short-tenor index.
    ///
    /// Without an explicit `payment_convention` the short-tenor schedule's
    /// convention is used for both legs.
    ///
    /// # Errors
    /// `InvalidInput` for a non-finite nominal or when a leg cannot be built.
    pub fn new(
        swap_type: BasisSwapType,
        nominal: f64,
        short_tenor: FloatingLegTerms,
        long_tenor: FloatingLegTerms,
        payment_convention: Option<BusinessDayConvention>,
    ) -> Result<Self, PricingError> {
        if !nominal.is_finite() {
            return Err(InstrumentError::InvalidNotional { notional: nominal }.into());
        }
        let payment_convention = payment_convention
            .unwrap_or_else(|| short_tenor.schedule.business_day_convention());

        let build = |terms: &FloatingLegTerms| {
            IborLeg::new(terms.schedule.clone(), Arc::clone(&terms.index))
                .with_notional(nominal)
                .with_payment_day_counter(terms.day_count)
                .with_payment_adjustment(payment_convention)
                .with_spread(terms.spread)
                .build()
        };
        let legs = vec![build(&short_tenor)?, build(&long_tenor)?];
        let payer = vec![
            swap_type.short_tenor_multiplier(),
            swap_type.long_tenor_multiplier(),
        ];
        let evaluation_date = Arc::clone(short_tenor.index.evaluation_date());
        let swap = Swap::new(legs, payer, evaluation_date)?;
        // The long index may price off a different evaluation date handle.
        swap.cache()
            .register_with(long_tenor.index.evaluation_date().observable());

        Ok(Self {
            swap_type,
            nominal,
            short_tenor,
            long_tenor,
            payment_convention,
            swap,
            short_tenor_fair_spread: None,
            long_tenor_fair_spread: None,
        })
    }

    /// Payer or receiver.
    pub fn swap_type(&self) -> BasisSwapType {
        self.swap_type
    }

    /// Nominal of both legs.
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Short-tenor accrual schedule.
    pub fn short_tenor_schedule(&self) -> &Schedule {
        &self.short_tenor.schedule
    }

    /// Short-tenor index.
    pub fn short_tenor_index(&self) -> &Arc<IborIndex> {
        &self.short_tenor.index
    }

    /// Short-tenor accrual day count.
    pub fn short_tenor_day_count(&self) -> DayCountConvention {
        self.short_tenor.day_count
    }

    /// Spread on the short-tenor leg.
    pub fn short_tenor_spread(&self) -> f64 {
        self.short_tenor.spread
    }

    /// Long-tenor accrual schedule.
    pub fn long_tenor_schedule(&self) -> &Schedule {
        &self.long_tenor.schedule
    }

    /// Long-tenor index.
    pub fn long_tenor_index(&self) -> &Arc<IborIndex> {
        &self.long_tenor.index
    }

    /// Long-tenor accrual day count.
    pub fn long_tenor_day_count(&self) -> DayCountConvention {
        self.long_tenor.day_count
    }

    /// Spread on the long-tenor leg.
    pub fn long_tenor_spread(&self) -> f64 {
        self.long_tenor.spread
    }

    /// Convention rolling accrual ends into payment dates.
    pub fn payment_convention(&self) -> BusinessDayConvention {
        self.payment_convention
    }

    /// Short-tenor coupons.
    pub fn short_tenor_leg(&self) -> &Leg {
        &self.swap.legs()[SHORT]
    }

    /// Long-tenor coupons.
    pub fn long_tenor_leg(&self) -> &Leg {
        &self.swap.legs()[LONG]
    }

    /// Underlying two-leg swap.
    pub fn swap(&self) -> &Swap {
        &self.swap
    }

    /// Latest payment date.
    pub fn maturity_date(&self) -> Date {
        self.swap.maturity_date()
    }

    /// Signed NPV of the short-tenor leg.
    pub fn short_tenor_leg_npv(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.swap
            .cache()
            .require(self.swap.cached_leg_npv(SHORT), "short-tenor leg NPV")
    }

    /// Signed NPV of the long-tenor leg.
    pub fn long_tenor_leg_npv(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.swap
            .cache()
            .require(self.swap.cached_leg_npv(LONG), "long-tenor leg NPV")
    }

    /// Signed basis-point sensitivity of the short-tenor leg.
    pub fn short_tenor_leg_bps(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.swap
            .cache()
            .require(self.swap.cached_leg_bps(SHORT), "short-tenor leg BPS")
    }

    /// Signed basis-point sensitivity of the long-tenor leg.
    pub fn long_tenor_leg_bps(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.swap
            .cache()
            .require(self.swap.cached_leg_bps(LONG), "long-tenor leg BPS")
    }

    /// Short-tenor spread that makes the swap worth zero.
    pub fn short_tenor_leg_fair_spread(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.swap
            .cache()
            .require(self.short_tenor_fair_spread, "short-tenor leg fair spread")
    }

    /// Long-tenor spread that makes the swap worth zero.
    pub fn long_tenor_leg_fair_spread(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.swap
            .cache()
            .require(self.long_tenor_fair_spread, "long-tenor leg fair spread")
    }

    /// Argument record for this swap, validated.
    pub fn arguments(&self) -> Result<BasisSwapArguments, PricingError> {
        let mut swap = SwapArguments::default();
        self.swap.fill_arguments(&mut swap);
        let args = BasisSwapArguments {
            swap,
            swap_type: Some(self.swap_type),
            nominal: Some(self.nominal),
            short_tenor: LegArguments::from_leg(self.short_tenor_leg()),
            long_tenor: LegArguments::from_leg(self.long_tenor_leg()),
        };
        args.validate()?;
        Ok(args)
    }
}

impl Instrument for BasisSwap {
    fn instrument_type(&self) -> &'static str {
        "BasisSwap"
    }

    fn cache(&self) -> &ValuationCache {
        self.swap.cache()
    }

    fn cache_mut(&mut self) -> &mut ValuationCache {
        self.swap.cache_mut()
    }

    fn pricing_engine(&self) -> Option<&SharedEngine> {
        self.swap.pricing_engine()
    }

    fn set_pricing_engine(&mut self, engine: SharedEngine) {
        self.swap.set_pricing_engine(engine);
    }

    fn is_expired(&self) -> bool {
        self.swap.is_expired()
    }

    fn setup_expired(&mut self) {
        self.swap.store_expired();
        self.short_tenor_fair_spread = None;
        self.long_tenor_fair_spread = None;
    }

    /// Basis-swap engines get the full record, plain swap engines only the
    /// legs. The record is validated either way.
    fn setup_arguments(&self, arguments: &mut dyn EngineArguments) -> Result<bool, PricingError> {
        let basis = self.arguments()?;
        if let Some(args) = arguments.downcast_mut::<BasisSwapArguments>() {
            *args = basis;
            return Ok(true);
        }
        if let Some(args) = arguments.downcast_mut::<SwapArguments>() {
            *args = basis.swap;
            return Ok(true);
        }
        Ok(false)
    }

    fn fetch_results(&mut self, results: &dyn EngineResults) -> Result<(), PricingError> {
        let basis = results.downcast_ref::<BasisSwapResults>();
        let legs = basis
            .map(|r| &r.swap)
            .or_else(|| results.downcast_ref::<SwapResults>());
        self.swap.store_results(results.base(), legs);

        self.short_tenor_fair_spread = basis.and_then(|r| r.short_tenor_leg_fair_spread);
        self.long_tenor_fair_spread = basis.and_then(|r| r.long_tenor_leg_fair_spread);

        let npv = self.swap.cache().results().value;
        if self.short_tenor_fair_spread.is_none() {
            self.short_tenor_fair_spread = implied_fair_spread(
                self.short_tenor.spread,
                npv,
                self.swap.cached_leg_bps(SHORT),
            );
        }
        if self.long_tenor_fair_spread.is_none() {
            self.long_tenor_fair_spread = implied_fair_spread(
                self.long_tenor.spread,
                npv,
                self.swap.cached_leg_bps(LONG),
            );
        }
        Ok(())
    }
}

impl Prototype for BasisSwap {
    fn duplicate(&self) -> Self {
        Self {
            swap_type: self.swap_type,
            nominal: self.nominal,
            short_tenor: self.short_tenor.clone(),
            long_tenor: self.long_tenor.clone(),
            payment_convention: self.payment_convention,
            swap: self.swap.duplicate(),
            short_tenor_fair_spread: None,
            long_tenor_fair_spread: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_core::traits::engine::{share, GenericEngine, PricingEngine};
    use pricer_core::types::EvaluationDate;
    use proptest::prelude::*;

    use crate::schedules::{Frequency, ScheduleBuilder};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn terms(eval: &Arc<EvaluationDate>, tenor: Frequency, spread: f64) -> FloatingLegTerms {
        let index = Arc::new(IborIndex::new(
            format!("Euribor{}", tenor.tenor_label()),
            tenor,
            2,
            DayCountConvention::ActualActual360,
            Arc::new(FlatCurve::new(0.03)),
            Arc::clone(eval),
        ));
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 1, 15))
            .end(d(2026, 1, 15))
            .frequency(tenor)
            .build()
            .unwrap();
        FloatingLegTerms::new(schedule, index, DayCountConvention::ActualActual360, spread)
    }

    fn basis_swap(swap_type: BasisSwapType, today: Date) -> (BasisSwap, Arc<EvaluationDate>) {
        let eval = Arc::new(EvaluationDate::new(today));
        let swap = BasisSwap::new(
            swap_type,
            1_000_000.0,
            terms(&eval, Frequency::Quarterly, 0.001),
            terms(&eval, Frequency::SemiAnnual, 0.0),
            None,
        )
        .unwrap();
        (swap, eval)
    }

    /// Engine answering with fixed swap-family numbers and no fair spreads.
    #[derive(Debug, Default)]
    struct FixedSwapEngine {
        core: GenericEngine<SwapArguments, SwapResults>,
    }

    impl PricingEngine for FixedSwapEngine {
        fn name(&self) -> &'static str {
            "FixedSwapEngine"
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
            self.core.results.base.value = Some(500.0);
            self.core.results.leg_npv = vec![Some(-100.0), Some(600.0)];
            self.core.results.leg_bps = vec![Some(200_000.0), None];
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct ForeignArguments;

    impl EngineArguments for ForeignArguments {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug, Default)]
    struct ForeignEngine {
        core: GenericEngine<ForeignArguments, InstrumentResults>,
    }

    impl PricingEngine for ForeignEngine {
        fn name(&self) -> &'static str {
            "ForeignEngine"
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
            Err(PricingError::ModelFailure("foreign engine ran".to_string()))
        }
    }

    #[test]
    fn test_type_from_code() {
        assert_eq!(BasisSwapType::try_from(1).unwrap(), BasisSwapType::Payer);
        assert_eq!(BasisSwapType::try_from(-1).unwrap(), BasisSwapType::Receiver);
        assert_eq!(
            BasisSwapType::try_from(0).unwrap_err(),
            InstrumentError::UnknownSwapType { code: 0 }
        );
        assert_eq!(BasisSwapType::Payer.to_string(), "Payer");
        assert_eq!(BasisSwapType::Receiver.to_string(), "Receiver");
    }

    #[test]
    fn test_leg_multipliers_mirror() {
        let (payer, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        let (receiver, _) = basis_swap(BasisSwapType::Receiver, d(2024, 1, 10));
        assert_eq!(payer.swap().payer_multipliers(), &[-1.0, 1.0]);
        assert_eq!(receiver.swap().payer_multipliers(), &[1.0, -1.0]);
    }

    #[test]
    fn test_default_payment_convention_from_short_schedule() {
        let (swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        assert_eq!(
            swap.payment_convention(),
            swap.short_tenor_schedule().business_day_convention()
        );
    }

    #[test]
    fn test_arguments_are_parallel_arrays() {
        let (swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        let args = swap.arguments().unwrap();
        assert_eq!(args.nominal, Some(1_000_000.0));
        assert_eq!(args.short_tenor.len(), 8);
        assert_eq!(args.short_tenor.fixing_dates.len(), 8);
        assert_eq!(args.long_tenor.accrual_times.len(), 4);
        assert_eq!(args.long_tenor.coupons.len(), 4);
        assert!(args.short_tenor.spreads.iter().all(|s| *s == 0.001));
        assert_eq!(args.short_tenor.reset_dates[0], d(2024, 1, 15));
        assert_eq!(args.short_tenor.fixing_dates[0], d(2024, 1, 11));
    }

    #[test]
    fn test_unfixed_past_coupon_is_unknown() {
        let (swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 2, 1));
        let args = swap.arguments().unwrap();
        assert_eq!(args.short_tenor.coupons[0], None);
        assert!(args.short_tenor.coupons[1].is_some());
    }

    #[test]
    fn test_validation_messages() {
        let (swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        let mut args = swap.arguments().unwrap();
        args.short_tenor.fixing_dates.pop();
        assert_eq!(
            args.validate().unwrap_err(),
            PricingError::InvalidInput(
                "number of shorter tenor leg fixing dates different from number of shorter tenor leg payment dates"
                    .to_string()
            )
        );

        let mut args = swap.arguments().unwrap();
        args.long_tenor.coupons.push(None);
        assert_eq!(
            args.validate().unwrap_err(),
            PricingError::InvalidInput(
                "number of longer tenor leg payment dates different from number of longer tenor leg coupon amounts"
                    .to_string()
            )
        );

        let mut args = swap.arguments().unwrap();
        args.nominal = None;
        assert_eq!(
            args.validate().unwrap_err(),
            PricingError::InvalidInput("nominal null or not set".to_string())
        );
    }

    #[test]
    fn test_generic_engine_triggers_reconciliation() {
        let (mut swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        swap.set_pricing_engine(share(FixedSwapEngine::default()));

        assert_eq!(swap.npv().unwrap(), 500.0);
        assert_eq!(swap.short_tenor_leg_npv().unwrap(), -100.0);
        assert_eq!(swap.long_tenor_leg_npv().unwrap(), 600.0);
        assert_relative_eq!(swap.short_tenor_leg_fair_spread().unwrap(), 0.00075, epsilon = 1e-15);
        assert!(matches!(
            swap.long_tenor_leg_fair_spread(),
            Err(PricingError::NotAvailable(_))
        ));
        assert!(matches!(swap.long_tenor_leg_bps(), Err(PricingError::NotAvailable(_))));
    }

    #[test]
    fn test_unsupported_engine_leaves_outputs_unavailable() {
        let (mut swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        swap.set_pricing_engine(share(ForeignEngine::default()));

        swap.calculate().unwrap();
        assert!(matches!(swap.npv(), Err(PricingError::UnsupportedInstrument(_))));
        assert!(swap.short_tenor_leg_bps().is_err());
        assert!(swap.long_tenor_leg_npv().is_err());
        assert!(swap.short_tenor_leg_fair_spread().is_err());
        assert!(swap.long_tenor_leg_fair_spread().is_err());
    }

    #[test]
    fn test_expired_swap_short_circuits() {
        let (mut swap, _) = basis_swap(BasisSwapType::Receiver, d(2026, 2, 1));
        swap.set_pricing_engine(share(ForeignEngine::default()));

        assert_eq!(swap.npv().unwrap(), 0.0);
        assert_eq!(swap.short_tenor_leg_bps().unwrap(), 0.0);
        assert_eq!(swap.long_tenor_leg_bps().unwrap(), 0.0);
        assert!(swap.short_tenor_leg_fair_spread().is_err());
        assert!(swap.long_tenor_leg_fair_spread().is_err());
    }

    #[test]
    fn test_date_move_to_expiry_invalidates() {
        let (mut swap, eval) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        swap.set_pricing_engine(share(FixedSwapEngine::default()));
        assert_eq!(swap.npv().unwrap(), 500.0);

        eval.set(d(2026, 6, 1));
        assert_eq!(swap.npv().unwrap(), 0.0);
    }

    #[test]
    fn test_long_leg_fixing_invalidates() {
        let (mut swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        swap.set_pricing_engine(share(FixedSwapEngine::default()));
        swap.npv().unwrap();

        swap.long_tenor_index().add_fixing(d(2024, 1, 11), 0.035);
        assert!(!swap.cache().is_valid());
    }

    #[test]
    fn test_duplicate_cache_is_independent() {
        let (mut swap, _) = basis_swap(BasisSwapType::Payer, d(2024, 1, 10));
        swap.set_pricing_engine(share(FixedSwapEngine::default()));
        let original = swap.npv().unwrap();

        let mut copy = swap.duplicate();
        assert!(!copy.cache().is_valid());
        assert_eq!(copy.nominal(), swap.nominal());
        copy.recalculate().unwrap();
        copy.cache().invalidate();

        assert!(swap.cache().is_valid());
        assert_eq!(swap.npv().unwrap(), original);
    }

    proptest! {
        #[test]
        fn prop_reconciliation_formula(
            spread in -0.01f64..0.01,
            npv in -1.0e6f64..1.0e6,
            bps in prop_oneof![-1.0e6f64..-1.0, 1.0f64..1.0e6],
        ) {
            let fair = implied_fair_spread(spread, Some(npv), Some(bps)).unwrap();
            prop_assert!((fair - (spread - npv * BASIS_POINT / bps)).abs() <= 1e-12 * (1.0 + fair.abs()));
        }

        #[test]
        fn prop_multipliers_opposite(code in prop_oneof![Just(1i32), Just(-1i32)]) {
            let t = BasisSwapType::try_from(code).unwrap();
            prop_assert_eq!(t.short_tenor_multiplier(), -t.long_tenor_multiplier());
            prop_assert_eq!(t.short_tenor_multiplier().abs(), 1.0);
        }
    }
}
