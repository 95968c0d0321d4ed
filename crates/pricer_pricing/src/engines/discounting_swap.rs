//! Discounting engine for generic multi-leg swaps.

use std::fmt;
use std::sync::Arc;

use pricer_core::traits::engine::{
    EngineArguments, EngineResults, GenericEngine, PricingEngine,
};
use pricer_core::types::{Date, EvaluationDate, PricingError, BASIS_POINT};
use pricer_models::cashflows::Leg;
use pricer_models::indexes::CurveHandle;
use pricer_models::instruments::rates::{SwapArguments, SwapResults};
use tracing::debug;

/// Discount factor from `today` to `date` on `curve`.
pub(crate) fn discount(curve: &CurveHandle, today: Date, date: Date) -> Result<f64, PricingError> {
    Ok(curve.discount_on(today, date)?)
}

/// Whether a flow paid on `date` still counts on `today`.
#[inline]
pub(crate) fn is_alive(date: Date, today: Date, include_settlement_date_flows: bool) -> bool {
    date > today || (include_settlement_date_flows && date == today)
}

/// Unsigned NPV and BPS of one leg.
fn leg_values(
    leg: &Leg,
    curve: &CurveHandle,
    today: Date,
    include_settlement_date_flows: bool,
) -> Result<(f64, f64), PricingError> {
    let mut npv = 0.0;
    let mut bps = 0.0;
    for coupon in leg {
        if coupon.has_occurred(today, include_settlement_date_flows) {
            continue;
        }
        let df = discount(curve, today, coupon.date())?;
        npv += coupon.amount()? * df;
        bps += coupon.nominal() * coupon.accrual_period() * df;
    }
    Ok((npv, bps * BASIS_POINT))
}

/// Prices any [`Swap`](pricer_models::instruments::rates::Swap) by
/// discounting projected coupons on one curve.
///
/// Reports NPV, per-leg NPV and per-leg BPS; fair spreads are left to the
/// instrument.
pub struct DiscountingSwapEngine {
    discount_curve: CurveHandle,
    evaluation_date: Arc<EvaluationDate>,
    include_settlement_date_flows: bool,
    core: GenericEngine<SwapArguments, SwapResults>,
}

impl DiscountingSwapEngine {
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
}

impl fmt::Debug for DiscountingSwapEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountingSwapEngine")
            .field("evaluation_date", &self.evaluation_date)
            .field("include_settlement_date_flows", &self.include_settlement_date_flows)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl PricingEngine for DiscountingSwapEngine {
    fn name(&self) -> &'static str {
        "DiscountingSwapEngine"
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
        let results = &mut self.core.results;

        let mut total = 0.0;
        results.leg_npv.clear();
        results.leg_bps.clear();
        for (leg, sign) in args.legs.iter().zip(&args.payer) {
            let (npv, bps) = leg_values(
                leg,
                &self.discount_curve,
                today,
                self.include_settlement_date_flows,
            )?;
            total += sign * npv;
            results.leg_npv.push(Some(sign * npv));
            results.leg_bps.push(Some(sign * bps));
        }
        results.base.value = Some(total);
        results.base.valuation_date = Some(today);
        debug!(legs = args.legs.len(), npv = total, "swap discounted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_core::traits::engine::share;
    use pricer_core::traits::Instrument;
    use pricer_core::types::DayCountConvention;
    use pricer_models::cashflows::IborLeg;
    use pricer_models::indexes::IborIndex;
    use pricer_models::instruments::rates::Swap;
    use pricer_models::schedules::{Frequency, ScheduleBuilder};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn setup(today: Date) -> (Arc<EvaluationDate>, CurveHandle, Leg) {
        let eval = Arc::new(EvaluationDate::new(today));
        let curve: CurveHandle = Arc::new(FlatCurve::new(0.03));
        let index = Arc::new(IborIndex::new(
            "Euribor6M",
            Frequency::SemiAnnual,
            2,
            DayCountConvention::ActualActual360,
            Arc::clone(&curve),
            Arc::clone(&eval),
        ));
        index.add_fixing(d(2024, 1, 11), 0.035);
        index.add_fixing(d(2024, 7, 11), 0.036);
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 1, 15))
            .end(d(2026, 1, 15))
            .frequency(Frequency::SemiAnnual)
            .build()
            .unwrap();
        let leg = IborLeg::new(schedule, index)
            .with_notional(1_000_000.0)
            .with_payment_day_counter(DayCountConvention::ActualActual360)
            .build()
            .unwrap();
        (eval, curve, leg)
    }

    #[test]
    fn test_opposite_legs_cancel() {
        let (eval, curve, leg) = setup(d(2024, 3, 1));
        let mut swap = Swap::new(vec![leg.clone(), leg], vec![-1.0, 1.0], Arc::clone(&eval)).unwrap();
        swap.set_pricing_engine(share(DiscountingSwapEngine::new(curve, eval)));

        assert_relative_eq!(swap.npv().unwrap(), 0.0, epsilon = 1e-9);
        let paid = swap.leg_npv(0).unwrap();
        assert!(paid < 0.0);
        assert_relative_eq!(swap.leg_npv(1).unwrap(), -paid, epsilon = 1e-9);
        assert!(swap.leg_bps(1).unwrap() > 0.0);
    }

    #[test]
    fn test_bps_matches_annuity() {
        let (eval, curve, leg) = setup(d(2024, 3, 1));
        let expected: f64 = leg
            .iter()
            .map(|c| c.nominal() * c.accrual_period() * discount(&curve, d(2024, 3, 1), c.date()).unwrap())
            .sum::<f64>()
            * BASIS_POINT;
        let mut swap = Swap::new(vec![leg], vec![1.0], Arc::clone(&eval)).unwrap();
        swap.set_pricing_engine(share(DiscountingSwapEngine::new(curve, eval)));
        assert_relative_eq!(swap.leg_bps(0).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_settlement_date_flows() {
        let (_, curve, leg) = setup(d(2024, 1, 1));
        let pay_date = leg[0].date();
        let eval = Arc::new(EvaluationDate::new(pay_date));
        let first = leg[0].amount().unwrap();

        let mut excluded = Swap::new(vec![leg.clone()], vec![1.0], Arc::clone(&eval)).unwrap();
        excluded.set_pricing_engine(share(DiscountingSwapEngine::new(
            Arc::clone(&curve),
            Arc::clone(&eval),
        )));
        let mut included = Swap::new(vec![leg], vec![1.0], Arc::clone(&eval)).unwrap();
        included.set_pricing_engine(share(
            DiscountingSwapEngine::new(curve, Arc::clone(&eval)).with_settlement_date_flows(true),
        ));

        let difference = included.npv().unwrap() - excluded.npv().unwrap();
        assert_relative_eq!(difference, first, max_relative = 1e-12);
    }

    #[test]
    fn test_debug_omits_curve() {
        let (eval, curve, _) = setup(d(2024, 3, 1));
        let text = format!("{:?}", DiscountingSwapEngine::new(curve, eval));
        assert!(text.starts_with("DiscountingSwapEngine"));
        assert!(text.contains("include_settlement_date_flows: false"));
        assert!(!text.contains("discount_curve"));
    }

    #[test]
    fn test_legs_without_multipliers_rejected() {
        let (eval, curve, leg) = setup(d(2024, 3, 1));
        let mut engine = DiscountingSwapEngine::new(curve, eval);
        engine.core.arguments.legs = vec![leg.clone(), leg];
        engine.core.arguments.payer = vec![1.0];
        assert!(matches!(engine.calculate(), Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_fixing_propagates() {
        let (eval, curve, leg) = setup(d(2024, 3, 1));
        leg[0].index().clear_fixings();
        let mut swap = Swap::new(vec![leg], vec![1.0], Arc::clone(&eval)).unwrap();
        swap.set_pricing_engine(share(DiscountingSwapEngine::new(curve, eval)));
        assert!(matches!(
            swap.npv(),
            Err(PricingError::MissingFixing { .. })
        ));
    }

    #[test]
    fn test_is_alive() {
        let today = d(2024, 6, 3);
        assert!(is_alive(d(2024, 6, 4), today, false));
        assert!(!is_alive(today, today, false));
        assert!(is_alive(today, today, true));
        assert!(!is_alive(d(2024, 6, 2), today, true));
    }
}
