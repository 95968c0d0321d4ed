//! Ibor-style term rate index.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::traits::Observable;
use pricer_core::types::time::{time_to_maturity_dates, BusinessDayConvention, Date, DayCountConvention};
use pricer_core::types::{EvaluationDate, PricingError};

use crate::schedules::Frequency;

/// Forecasting curve handle shared by indices and engines.
pub type CurveHandle = Arc<dyn YieldCurve<f64> + Send + Sync>;

/// Ibor-style index: a simple rate over `tenor`, fixed `fixing_days`
/// business days before the start of the deposit.
///
/// Past fixings come from the fixing store; fixings on or after the
/// evaluation date are forecast from the curve unless one has been stored
/// for today. Storing a fixing notifies every registered observer.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_core::types::{Date, DayCountConvention, EvaluationDate};
/// use pricer_models::indexes::IborIndex;
/// use pricer_models::schedules::Frequency;
///
/// let today = Arc::new(EvaluationDate::new(Date::from_ymd(2024, 1, 15).unwrap()));
/// let index = IborIndex::new(
///     "Euribor3M",
///     Frequency::Quarterly,
///     2,
///     DayCountConvention::ActualActual360,
///     Arc::new(FlatCurve::new(0.03)),
///     today,
/// );
///
/// let past = Date::from_ymd(2024, 1, 10).unwrap();
/// assert!(index.fixing(past).is_err());
/// index.add_fixing(past, 0.0391);
/// assert_eq!(index.fixing(past).unwrap(), 0.0391);
/// ```
pub struct IborIndex {
    name: String,
    tenor: Frequency,
    fixing_days: i64,
    day_count: DayCountConvention,
    convention: BusinessDayConvention,
    forecast_curve: CurveHandle,
    evaluation_date: Arc<EvaluationDate>,
    fixings: RwLock<BTreeMap<Date, f64>>,
    observable: Observable,
}

impl IborIndex {
    /// Creates an index with Modified Following deposit maturities.
    pub fn new(
        name: impl Into<String>,
        tenor: Frequency,
        fixing_days: u32,
        day_count: DayCountConvention,
        forecast_curve: CurveHandle,
        evaluation_date: Arc<EvaluationDate>,
    ) -> Self {
        Self {
            name: name.into(),
            tenor,
            fixing_days: i64::from(fixing_days),
            day_count,
            convention: BusinessDayConvention::ModifiedFollowing,
            forecast_curve,
            evaluation_date,
            fixings: RwLock::new(BTreeMap::new()),
            observable: Observable::new(),
        }
    }

    /// Index name, e.g. `"Euribor3M"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deposit tenor.
    pub fn tenor(&self) -> Frequency {
        self.tenor
    }

    /// Business days between fixing and deposit start.
    pub fn fixing_days(&self) -> u32 {
        self.fixing_days as u32
    }

    /// Day count of the deposit rate.
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Evaluation date the index forecasts from.
    pub fn evaluation_date(&self) -> &Arc<EvaluationDate> {
        &self.evaluation_date
    }

    /// Observable notified when fixings change.
    pub fn observable(&self) -> &Observable {
        &self.observable
    }

    /// Fixing date for a deposit starting on `value_date`.
    pub fn fixing_date(&self, value_date: Date) -> Result<Date, PricingError> {
        Ok(value_date.add_business_days(-self.fixing_days)?)
    }

    /// Deposit start for a fixing on `fixing_date`.
    pub fn value_date(&self, fixing_date: Date) -> Result<Date, PricingError> {
        Ok(fixing_date.add_business_days(self.fixing_days)?)
    }

    /// Deposit end for a deposit starting on `value_date`.
    pub fn maturity_date(&self, value_date: Date) -> Result<Date, PricingError> {
        let unadjusted = value_date.add_months(self.tenor.months())?;
        Ok(self.convention.adjust(unadjusted)?)
    }

    /// Stores a historic fixing and notifies observers.
    pub fn add_fixing(&self, date: Date, rate: f64) {
        self.fixings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(date, rate);
        tracing::debug!(index = %self.name, %date, rate, "fixing stored");
        self.observable.notify_observers();
    }

    /// Removes every stored fixing and notifies observers.
    pub fn clear_fixings(&self) {
        self.fixings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.observable.notify_observers();
    }

    /// Stored fixing for `date`, if any.
    pub fn stored_fixing(&self, date: Date) -> Option<f64> {
        self.fixings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&date)
            .copied()
    }

    /// Index rate fixed on `fixing_date`.
    ///
    /// # Errors
    /// `MissingFixing` for a past date with no stored fixing; curve errors
    /// from forecasting.
    pub fn fixing(&self, fixing_date: Date) -> Result<f64, PricingError> {
        let today = self.evaluation_date.get();
        if fixing_date <= today {
            if let Some(rate) = self.stored_fixing(fixing_date) {
                return Ok(rate);
            }
            if fixing_date < today {
                return Err(PricingError::MissingFixing {
                    index: self.name.clone(),
                    date: fixing_date.to_string(),
                });
            }
        }
        self.forecast_fixing(fixing_date)
    }

    /// Rate implied by the forecasting curve for a fixing on `fixing_date`.
    pub fn forecast_fixing(&self, fixing_date: Date) -> Result<f64, PricingError> {
        let today = self.evaluation_date.get();
        let start = self.value_date(fixing_date)?;
        let end = self.maturity_date(start)?;
        let t_start = time_to_maturity_dates(today, start).max(0.0);
        let t_end = time_to_maturity_dates(today, end).max(0.0);
        let growth = 1.0 / self.forecast_curve.forward_discount(t_start, t_end)?;
        let accrual = self.day_count.year_fraction_dates(start, end);
        if accrual <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "{} deposit from {} to {} has no accrual",
                self.name, start, end
            )));
        }
        Ok((growth - 1.0) / accrual)
    }
}

impl fmt::Debug for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IborIndex")
            .field("name", &self.name)
            .field("tenor", &self.tenor)
            .field("fixing_days", &self.fixing_days)
            .field("day_count", &self.day_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_core::traits::ValuationCache;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn index(today: Date) -> IborIndex {
        IborIndex::new(
            "Euribor6M",
            Frequency::SemiAnnual,
            2,
            DayCountConvention::ActualActual360,
            Arc::new(FlatCurve::new(0.02)),
            Arc::new(EvaluationDate::new(today)),
        )
    }

    #[test]
    fn test_forecast_matches_flat_curve() {
        let idx = index(d(2024, 1, 15));
        let fixing_date = d(2024, 7, 11);
        let start = idx.value_date(fixing_date).unwrap();
        let end = idx.maturity_date(start).unwrap();
        let tau = DayCountConvention::ActualActual360.year_fraction_dates(start, end);
        let t = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
        let expected = ((0.02 * t).exp() - 1.0) / tau;
        assert_relative_eq!(idx.fixing(fixing_date).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_today_uses_stored_fixing_if_present() {
        let today = d(2024, 1, 15);
        let idx = index(today);
        let forecast = idx.fixing(today).unwrap();
        idx.add_fixing(today, 0.05);
        assert_eq!(idx.fixing(today).unwrap(), 0.05);
        idx.clear_fixings();
        assert_relative_eq!(idx.fixing(today).unwrap(), forecast);
    }

    #[test]
    fn test_missing_past_fixing() {
        let idx = index(d(2024, 1, 15));
        let err = idx.fixing(d(2024, 1, 12)).unwrap_err();
        assert!(matches!(err, PricingError::MissingFixing { .. }));
    }

    #[test]
    fn test_fixing_notifies_observers() {
        let idx = index(d(2024, 1, 15));
        let cache = ValuationCache::new();
        cache.register_with(idx.observable());
        cache.mark_valid();
        idx.add_fixing(d(2024, 1, 11), 0.04);
        assert!(!cache.is_valid());
    }

    #[test]
    fn test_fixing_and_value_dates_skip_weekends() {
        let idx = index(d(2024, 1, 15));
        // Monday value date fixes on the previous Thursday
        assert_eq!(idx.fixing_date(d(2024, 1, 15)).unwrap(), d(2024, 1, 11));
        assert_eq!(idx.value_date(d(2024, 1, 11)).unwrap(), d(2024, 1, 15));
    }
}
