//! Discounting engine for floating/floating basis swaps.

use std::fmt;
use std::sync::Arc;

use pricer_core::traits::engine::{
    EngineArguments, EngineResults, GenericEngine, PricingEngine,
};
use pricer_core::types::{Date, EvaluationDate, PricingError, BASIS_POINT};
use pricer_models::indexes::CurveHandle;
use pricer_models::instruments::rates::{
    implied_fair_spread, BasisSwapArguments, BasisSwapResults, LegArguments,
};
use tracing::debug;

use super::discounting_swap::{discount, is_alive};

/// Values a [`BasisSwap`](pricer_models::instruments::rates::BasisSwap)
/// from its marshalled leg arrays and reports fair spreads directly.
///
/// Coupon amounts come from the instrument; the engine only discounts them.
/// A live coupon whose amount could not be projected makes the run fail.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::types::{Date, EvaluationDate};
/// use pricer_models::indexes::CurveHandle;
/// use pricer_pricing::engines::DiscountingBasisSwapEngine;
///
/// let today = Arc::new(EvaluationDate::new(Date::from_ymd(2024, 1, 15).unwrap()));
/// let curve: CurveHandle = Arc::new(FlatCurve::new(0.03));
/// let engine = DiscountingBasisSwapEngine::new(curve, today);
/// assert!(!engine.include_settlement_date_flows());
/// ```
pub struct DiscountingBasisSwapEngine {
    discount_curve: CurveHandle,
    evaluation_date: Arc<EvaluationDate>,
    include_settlement_date_flows: bool,
    core: GenericEngine<BasisSwapArguments, BasisSwapResults>,
}

impl DiscountingBasisSwapEngine {
    /// Creates an engine ignoring flows paid on the evaluation date.
    pub fn new(discount_curve: CurveHandle, evaluation_date: Arc<EvaluationDate>) -> Self {
        Self {
            discount_curve,
            evaluation_date,
            include_settlement_date_flows: false,
            core: GenericEngine::default(),
        }
    }

    /// Counts flows paid on the evaluation date when `include` is set.
    pub fn with_settlement_date_flows(mut self, include: bool) -> Self {
        self.include_settlement_date_flows = include;
        self
    }

    /// Whether flows paid on the evaluation date count.
    pub fn include_settlement_date_flows(&self) -> bool {
        self.include_settlement_date_flows
    }

    fn leg_values(
        &self,
        leg: &LegArguments,
        nominal: f64,
        today: Date,
        side: &str,
    ) -> Result<(f64, f64), PricingError> {
        let mut npv = 0.0;
        let mut annuity = 0.0;
        let flows = leg.pay_dates.iter().zip(&leg.coupons).zip(&leg.accrual_times);
        for (i, ((&pay_date, coupon), accrual)) in flows.enumerate() {
            if !is_alive(pay_date, today, self.include_settlement_date_flows) {
                continue;
            }
            let amount = coupon.ok_or_else(|| {
                PricingError::NotAvailable(format!(
                    "{} tenor leg coupon {} paid on {}",
                    side, i, pay_date
                ))
            })?;
            let df = discount(&self.discount_curve, today, pay_date)?;
            npv += amount * df;
            annuity += nominal * accrual * df;
        }
        Ok((npv, annuity * BASIS_POINT))
    }
}

impl fmt::Debug for DiscountingBasisSwapEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountingBasisSwapEngine")
            .field("evaluation_date", &self.evaluation_date)
            .field("include_settlement_date_flows", &self.include_settlement_date_flows)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl PricingEngine for DiscountingBasisSwapEngine {
    fn name(&self) -> &'static str {
        "DiscountingBasisSwapEngine"
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
        let today = self.evaluation_date.get();
        let args = &self.core.arguments;
        args.validate()?;
        let swap_type = args
            .swap_type
            .ok_or_else(|| PricingError::InvalidInput("basis swap type not set".to_string()))?;
        let nominal = args
            .nominal
            .ok_or_else(|| PricingError::InvalidInput("nominal null or not set".to_string()))?;

        let (short_npv, short_bps) = self.leg_values(&args.short_tenor, nominal, today, "shorter")?;
        let (long_npv, long_bps) = self.leg_values(&args.long_tenor, nominal, today, "longer")?;

        let short_sign = swap_type.short_tenor_multiplier();
        let long_sign = swap_type.long_tenor_multiplier();
        let short_npv = short_sign * short_npv;
        let short_bps = short_sign * short_bps;
        let long_npv = long_sign * long_npv;
        let long_bps = long_sign * long_bps;
        let npv = short_npv + long_npv;

        let short_spread = args.short_tenor.spreads.first().copied().unwrap_or(0.0);
        let long_spread = args.long_tenor.spreads.first().copied().unwrap_or(0.0);

        let results = &mut self.core.results;
        results.swap.base.value = Some(npv);
        results.swap.base.valuation_date = Some(today);
        results.swap.leg_npv = vec![Some(short_npv), Some(long_npv)];
        results.swap.leg_bps = vec![Some(short_bps), Some(long_bps)];
        results.short_tenor_leg_fair_spread =
            implied_fair_spread(short_spread, Some(npv), Some(short_bps));
        results.long_tenor_leg_fair_spread =
            implied_fair_spread(long_spread, Some(npv), Some(long_bps));

        debug!(
            swap_type = %swap_type,
            npv,
            short_bps,
            long_bps,
            "basis swap discounted"
        );
        Ok(())
    }
}
