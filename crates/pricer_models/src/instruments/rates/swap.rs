//! Generic multi-leg swap.
//!
//! A [`Swap`] is a list of floating legs, each with a payer multiplier
//! (`-1` paid, `+1` received). Engines understanding [`SwapArguments`]
//! report per-leg NPV and BPS through [`SwapResults`].

use std::any::Any;
use std::sync::Arc;

use pricer_core::traits::engine::{EngineArguments, EngineResults, InstrumentResults, SharedEngine};
use pricer_core::traits::{Instrument, Prototype, ValuationCache};
use pricer_core::types::time::Date;
use pricer_core::types::{EvaluationDate, PricingError};

use crate::cashflows::Leg;

/// Arguments understood by every swap engine.
#[derive(Debug, Clone, Default)]
pub struct SwapArguments {
    /// Coupons of each leg.
    pub legs: Vec<Leg>,
    /// Sign of each leg: `-1.0` paid, `+1.0` received.
    pub payer: Vec<f64>,
}

impl EngineArguments for SwapArguments {
    fn validate(&self) -> Result<(), PricingError> {
        if self.legs.len() != self.payer.len() {
            return Err(PricingError::InvalidInput(
                "number of legs and multipliers differ".to_string(),
            ));
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-leg outputs of a swap engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapResults {
    /// NPV and friends.
    pub base: InstrumentResults,
    /// Signed NPV of each leg.
    pub leg_npv: Vec<Option<f64>>,
    /// Signed value of a one-basis-point spread shift on each leg.
    pub leg_bps: Vec<Option<f64>>,
}

impl EngineResults for SwapResults {
    fn reset(&mut self) {
        self.base.reset();
        self.leg_npv.clear();
        self.leg_bps.clear();
    }

    fn base(&self) -> &InstrumentResults {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Swap exchanging the cash flows of several floating legs.
///
/// The swap observes the evaluation date and the index of every coupon, so
/// moving the date or storing a fixing invalidates cached results.
#[derive(Debug)]
pub struct Swap {
    legs: Vec<Leg>,
    payer: Vec<f64>,
    evaluation_date: Arc<EvaluationDate>,
    maturity: Date,
    leg_npv: Vec<Option<f64>>,
    leg_bps: Vec<Option<f64>>,
    cache: ValuationCache,
    engine: Option<SharedEngine>,
}

impl Swap {
    /// Creates a swap from legs and their payer multipliers.
    ///
    /// # Errors
    /// `InvalidInput` when the counts differ, a multiplier is not `±1`, or
    /// the swap has no coupon at all.
    pub fn new(
        legs: Vec<Leg>,
        payer: Vec<f64>,
        evaluation_date: Arc<EvaluationDate>,
    ) -> Result<Self, PricingError> {
        if legs.len() != payer.len() {
            return Err(PricingError::InvalidInput(
                "number of legs and multipliers differ".to_string(),
            ));
        }
        if let Some(m) = payer.iter().find(|m| m.abs() != 1.0) {
            return Err(PricingError::InvalidInput(format!(
                "payer multiplier must be -1 or +1, got {}",
                m
            )));
        }
        let maturity = legs
            .iter()
            .flatten()
            .map(|c| c.date())
            .max()
            .ok_or_else(|| PricingError::InvalidInput("swap has no cash flows".to_string()))?;

        let swap = Self {
            legs,
            payer,
            evaluation_date,
            maturity,
            leg_npv: Vec::new(),
            leg_bps: Vec::new(),
            cache: ValuationCache::new(),
            engine: None,
        };
        swap.register_observables();
        Ok(swap)
    }

    fn register_observables(&self) {
        self.cache.register_with(self.evaluation_date.observable());
        for coupon in self.legs.iter().flatten() {
            self.cache.register_with(coupon.index().observable());
        }
    }

    /// All legs.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Leg `i`.
    pub fn leg(&self, i: usize) -> Result<&Leg, PricingError> {
        self.legs
            .get(i)
            .ok_or_else(|| PricingError::InvalidInput(format!("leg #{} doesn't exist", i)))
    }

    /// Whether leg `i` is paid.
    pub fn is_payer(&self, i: usize) -> Result<bool, PricingError> {
        self.leg(i)?;
        Ok(self.payer[i] < 0.0)
    }

    /// Payer multipliers of all legs.
    pub fn payer_multipliers(&self) -> &[f64] {
        &self.payer
    }

    /// Shared evaluation date.
    pub fn evaluation_date(&self) -> &Arc<EvaluationDate> {
        &self.evaluation_date
    }

    /// Earliest accrual start over all legs.
    pub fn start_date(&self) -> Date {
        self.legs
            .iter()
            .flatten()
            .map(|c| c.accrual_start_date())
            .min()
            .unwrap_or(self.maturity)
    }

    /// Latest payment date over all legs.
    pub fn maturity_date(&self) -> Date {
        self.maturity
    }

    /// NPV of leg `i` as last computed, without triggering a calculation.
    pub fn cached_leg_npv(&self, i: usize) -> Option<f64> {
        self.leg_npv.get(i).copied().flatten()
    }

    /// BPS of leg `i` as last computed, without triggering a calculation.
    pub fn cached_leg_bps(&self, i: usize) -> Option<f64> {
        self.leg_bps.get(i).copied().flatten()
    }

    /// Signed NPV of leg `i`.
    pub fn leg_npv(&mut self, i: usize) -> Result<f64, PricingError> {
        self.leg(i)?;
        self.calculate()?;
        self.cache
            .require(self.cached_leg_npv(i), &format!("leg #{} NPV", i))
    }

    /// Signed basis-point sensitivity of leg `i`.
    pub fn leg_bps(&mut self, i: usize) -> Result<f64, PricingError> {
        self.leg(i)?;
        self.calculate()?;
        self.cache
            .require(self.cached_leg_bps(i), &format!("leg #{} BPS", i))
    }

    /// Writes legs and multipliers into `arguments`.
    pub fn fill_arguments(&self, arguments: &mut SwapArguments) {
        arguments.legs = self.legs.clone();
        arguments.payer = self.payer.clone();
    }

    /// Stores base results and, when available, per-leg results.
    ///
    /// Per-leg outputs become unavailable when `legs` is `None`, i.e. the
    /// engine produced no swap-family results.
    pub fn store_results(&mut self, base: &InstrumentResults, legs: Option<&SwapResults>) {
        self.cache.store(base.clone());
        let n = self.legs.len();
        match legs {
            Some(r) => {
                self.leg_npv = padded(&r.leg_npv, n);
                self.leg_bps = padded(&r.leg_bps, n);
            }
            None => {
                self.leg_npv = vec![None; n];
                self.leg_bps = vec![None; n];
            }
        }
    }

    /// Zero value and zero leg outputs.
    pub fn store_expired(&mut self) {
        self.cache.store_expired();
        let n = self.legs.len();
        self.leg_npv = vec![Some(0.0); n];
        self.leg_bps = vec![Some(0.0); n];
    }
}

fn padded(values: &[Option<f64>], n: usize) -> Vec<Option<f64>> {
    (0..n).map(|i| values.get(i).copied().flatten()).collect()
}

impl Instrument for Swap {
    fn instrument_type(&self) -> &'static str {
        "Swap"
    }

    fn cache(&self) -> &ValuationCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut ValuationCache {
        &mut self.cache
    }

    fn pricing_engine(&self) -> Option<&SharedEngine> {
        self.engine.as_ref()
    }

    fn set_pricing_engine(&mut self, engine: SharedEngine) {
        self.engine = Some(engine);
        self.cache.invalidate();
    }

    /// Expired once the evaluation date is past the last payment.
    fn is_expired(&self) -> bool {
        self.evaluation_date.get() > self.maturity
    }

    fn setup_expired(&mut self) {
        self.store_expired();
    }

    fn setup_arguments(&self, arguments: &mut dyn EngineArguments) -> Result<bool, PricingError> {
        match arguments.downcast_mut::<SwapArguments>() {
            Some(args) => {
                self.fill_arguments(args);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn fetch_results(&mut self, results: &dyn EngineResults) -> Result<(), PricingError> {
        self.store_results(results.base(), results.downcast_ref::<SwapResults>());
        Ok(())
    }
}

impl Prototype for Swap {
    fn duplicate(&self) -> Self {
        let copy = Self {
            legs: self.legs.clone(),
            payer: self.payer.clone(),
            evaluation_date: Arc::clone(&self.evaluation_date),
            maturity: self.maturity,
            leg_npv: Vec::new(),
            leg_bps: Vec::new(),
            cache: ValuationCache::new(),
            engine: self.engine.clone(),
        };
        copy.register_observables();
        copy
    }
}
