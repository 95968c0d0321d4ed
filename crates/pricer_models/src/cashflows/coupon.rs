//! Ibor floating-rate coupon.

use std::sync::Arc;

use pricer_core::types::time::{Date, DayCountConvention};
use pricer_core::types::PricingError;

use crate::indexes::IborIndex;

/// Coupon paying `nominal * (gearing * fixing + spread) * accrual_period`.
#[derive(Debug, Clone)]
pub struct FloatingRateCoupon {
    payment_date: Date,
    nominal: f64,
    accrual_start: Date,
    accrual_end: Date,
    fixing_date: Date,
    accrual_period: f64,
    day_count: DayCountConvention,
    spread: f64,
    gearing: f64,
    index: Arc<IborIndex>,
}

impl FloatingRateCoupon {
    /// Creates a coupon; the accrual period is taken from `day_count`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        payment_date: Date,
        nominal: f64,
        accrual_start: Date,
        accrual_end: Date,
        fixing_date: Date,
        day_count: DayCountConvention,
        spread: f64,
        gearing: f64,
        index: Arc<IborIndex>,
    ) -> Self {
        Self {
            payment_date,
            nominal,
            accrual_start,
            accrual_end,
            fixing_date,
            accrual_period: day_count.year_fraction_dates(accrual_start, accrual_end),
            day_count,
            spread,
            gearing,
            index,
        }
    }

    /// Payment date.
    #[inline]
    pub fn date(&self) -> Date {
        self.payment_date
    }

    /// Coupon nominal.
    #[inline]
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Accrual start, which is also the reset date.
    #[inline]
    pub fn accrual_start_date(&self) -> Date {
        self.accrual_start
    }

    /// Accrual end.
    #[inline]
    pub fn accrual_end_date(&self) -> Date {
        self.accrual_end
    }

    /// Index fixing date.
    #[inline]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Accrual year fraction.
    #[inline]
    pub fn accrual_period(&self) -> f64 {
        self.accrual_period
    }

    /// Accrual day count.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Spread over the index.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Multiplier on the index fixing.
    #[inline]
    pub fn gearing(&self) -> f64 {
        self.gearing
    }

    /// Underlying index.
    pub fn index(&self) -> &Arc<IborIndex> {
        &self.index
    }

    /// Index fixing for this coupon.
    pub fn index_fixing(&self) -> Result<f64, PricingError> {
        self.index.fixing(self.fixing_date)
    }

    /// Coupon rate including gearing and spread.
    pub fn rate(&self) -> Result<f64, PricingError> {
        Ok(self.gearing * self.index_fixing()? + self.spread)
    }

    /// Cash amount paid on [`date`](Self::date).
    ///
    /// # Errors
    /// Fails when the fixing cannot be determined, e.g. a missing past fixing.
    pub fn amount(&self) -> Result<f64, PricingError> {
        Ok(self.nominal * self.rate()? * self.accrual_period)
    }

    /// Whether the coupon was paid before `reference`.
    ///
    /// A payment on `reference` itself counts as occurred unless
    /// `include_reference_date` is set.
    pub fn has_occurred(&self, reference: Date, include_reference_date: bool) -> bool {
        if include_reference_date {
            self.payment_date < reference
        } else {
            self.payment_date <= reference
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_core::types::EvaluationDate;

    use crate::schedules::Frequency;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn coupon(today: Date, spread: f64, gearing: f64) -> FloatingRateCoupon {
        let index = Arc::new(IborIndex::new(
            "Euribor3M",
            Frequency::Quarterly,
            2,
            DayCountConvention::ActualActual360,
            Arc::new(FlatCurve::new(0.03)),
            Arc::new(EvaluationDate::new(today)),
        ));
        FloatingRateCoupon::new(
            d(2024, 4, 15),
            1_000_000.0,
            d(2024, 1, 15),
            d(2024, 4, 15),
            d(2024, 1, 11),
            DayCountConvention::ActualActual360,
            spread,
            gearing,
            index,
        )
    }

    #[test]
    fn test_amount_with_stored_fixing() {
        let c = coupon(d(2024, 2, 1), 0.001, 1.0);
        c.index().add_fixing(d(2024, 1, 11), 0.04);
        assert_relative_eq!(c.rate().unwrap(), 0.041, epsilon = 1e-15);
        assert_relative_eq!(c.amount().unwrap(), 1_000_000.0 * 0.041 * 91.0 / 360.0, epsilon = 1e-8);
    }

    #[test]
    fn test_gearing_applies_to_fixing_only() {
        let c = coupon(d(2024, 2, 1), 0.002, 2.0);
        c.index().add_fixing(d(2024, 1, 11), 0.01);
        assert_relative_eq!(c.rate().unwrap(), 0.022, epsilon = 1e-15);
    }

    #[test]
    fn test_missing_fixing_makes_amount_unavailable() {
        let c = coupon(d(2024, 2, 1), 0.0, 1.0);
        assert!(matches!(c.amount(), Err(PricingError::MissingFixing { .. })));
    }

    #[test]
    fn test_has_occurred_reference_date_handling() {
        let c = coupon(d(2024, 1, 1), 0.0, 1.0);
        assert!(c.has_occurred(d(2024, 4, 15), false));
        assert!(!c.has_occurred(d(2024, 4, 15), true));
        assert!(!c.has_occurred(d(2024, 4, 14), false));
    }
}
