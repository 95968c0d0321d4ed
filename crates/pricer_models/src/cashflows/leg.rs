//! Builder for Ibor floating legs.

use std::sync::Arc;

use pricer_core::types::time::{BusinessDayConvention, DayCountConvention};
use pricer_core::types::PricingError;

use super::coupon::FloatingRateCoupon;
use super::Leg;
use crate::indexes::IborIndex;
use crate::schedules::Schedule;

/// Builds one [`FloatingRateCoupon`] per schedule period.
///
/// Per-period inputs (notionals, spreads, gearings) are given as vectors;
/// periods past the end of a vector reuse its last value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::types::{BusinessDayConvention, Date, DayCountConvention, EvaluationDate};
/// use pricer_models::cashflows::IborLeg;
/// use pricer_models::indexes::IborIndex;
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
///
/// let today = Arc::new(EvaluationDate::new(Date::from_ymd(2024, 1, 10).unwrap()));
/// let index = Arc::new(IborIndex::new(
///     "Euribor3M", Frequency::Quarterly, 2, DayCountConvention::ActualActual360,
///     Arc::new(FlatCurve::new(0.03)), today,
/// ));
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .end(Date::from_ymd(2025, 1, 15).unwrap())
///     .frequency(Frequency::Quarterly)
///     .build()
///     .unwrap();
///
/// let leg = IborLeg::new(schedule, index)
///     .with_notional(1_000_000.0)
///     .with_spread(0.0010)
///     .with_payment_adjustment(BusinessDayConvention::Following)
///     .build()
///     .unwrap();
///
/// assert_eq!(leg.len(), 4);
/// assert!(leg.iter().all(|c| c.spread() == 0.0010));
/// ```
#[derive(Debug, Clone)]
pub struct IborLeg {
    schedule: Schedule,
    index: Arc<IborIndex>,
    notionals: Vec<f64>,
    payment_day_counter: Option<DayCountConvention>,
    payment_adjustment: BusinessDayConvention,
    fixing_days: Option<u32>,
    spreads: Vec<f64>,
    gearings: Vec<f64>,
}

impl IborLeg {
    /// Starts a leg on `schedule` indexed to `index`.
    pub fn new(schedule: Schedule, index: Arc<IborIndex>) -> Self {
        Self {
            schedule,
            index,
            notionals: Vec::new(),
            payment_day_counter: None,
            payment_adjustment: BusinessDayConvention::Following,
            fixing_days: None,
            spreads: Vec::new(),
            gearings: Vec::new(),
        }
    }

    /// Same notional for every period.
    pub fn with_notional(self, notional: f64) -> Self {
        self.with_notionals(vec![notional])
    }

    /// Per-period notionals.
    pub fn with_notionals(mut self, notionals: Vec<f64>) -> Self {
        self.notionals = notionals;
        self
    }

    /// Accrual day count; defaults to the index's.
    pub fn with_payment_day_counter(mut self, day_count: DayCountConvention) -> Self {
        self.payment_day_counter = Some(day_count);
        self
    }

    /// Convention rolling accrual end dates into payment dates.
    pub fn with_payment_adjustment(mut self, convention: BusinessDayConvention) -> Self {
        self.payment_adjustment = convention;
        self
    }

    /// Fixing lag in business days; defaults to the index's.
    pub fn with_fixing_days(mut self, days: u32) -> Self {
        self.fixing_days = Some(days);
        self
    }

    /// Same spread for every period.
    pub fn with_spread(self, spread: f64) -> Self {
        self.with_spreads(vec![spread])
    }

    /// Per-period spreads; defaults to zero.
    pub fn with_spreads(mut self, spreads: Vec<f64>) -> Self {
        self.spreads = spreads;
        self
    }

    /// Per-period gearings; defaults to one.
    pub fn with_gearings(mut self, gearings: Vec<f64>) -> Self {
        self.gearings = gearings;
        self
    }

    /// Builds the coupons.
    ///
    /// # Errors
    /// `InvalidInput` when no notional was given or more per-period values
    /// than periods were supplied.
    pub fn build(self) -> Result<Leg, PricingError> {
        if self.notionals.is_empty() {
            return Err(PricingError::InvalidInput("no notional given".to_string()));
        }
        let periods = self.schedule.len() - 1;
        for (what, len) in [
            ("notionals", self.notionals.len()),
            ("spreads", self.spreads.len()),
            ("gearings", self.gearings.len()),
        ] {
            if len > periods {
                return Err(PricingError::InvalidInput(format!(
                    "too many {} ({}), only {} periods",
                    what, len, periods
                )));
            }
        }

        let day_count = self.payment_day_counter.unwrap_or(self.index.day_count());
        let fixing_days = i64::from(self.fixing_days.unwrap_or(self.index.fixing_days()));

        self.schedule
            .periods()
            .enumerate()
            .map(|(i, (start, end))| {
                Ok(FloatingRateCoupon::new(
                    self.payment_adjustment.adjust(end)?,
                    value_at(&self.notionals, i, 0.0),
                    start,
                    end,
                    start.add_business_days(-fixing_days)?,
                    day_count,
                    value_at(&self.spreads, i, 0.0),
                    value_at(&self.gearings, i, 1.0),
                    Arc::clone(&self.index),
                ))
            })
            .collect()
    }
}

fn value_at(values: &[f64], i: usize, default: f64) -> f64 {
    values
        .get(i)
        .or_else(|| values.last())
        .copied()
        .unwrap_or(default)
}
