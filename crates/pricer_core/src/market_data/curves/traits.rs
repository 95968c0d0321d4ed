//! The `YieldCurve` trait.

use crate::market_data::error::MarketDataError;
use crate::types::{time_to_maturity_dates, Date};
use num_traits::Float;

fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Discount factors by year fraction from the evaluation date.
///
/// Implementors provide `discount_factor`; rates and date-based lookups
/// follow from it with continuous compounding and Act/365 year fractions.
pub trait YieldCurve<T: Float> {
    /// Discount factor from the origin to `t`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Discount factor from `today` to `date`; dates on or before `today`
    /// discount by one.
    fn discount_on(&self, today: Date, date: Date) -> Result<T, MarketDataError> {
        let t = time_to_maturity_dates(today, date).max(0.0);
        let t = T::from(t).ok_or(MarketDataError::InvalidMaturity { t })?;
        self.discount_factor(t)
    }

    /// Discount factor from `t1` to `t2`, `t1 <= t2`.
    fn forward_discount(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::UnorderedTimes {
                start: as_f64(t1),
                end: as_f64(t2),
            });
        }
        Ok(self.discount_factor(t2)? / self.discount_factor(t1)?)
    }

    /// Zero rate to `t`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity { t: as_f64(t) });
        }
        let df = self.discount_factor(t)?;
        if df <= T::zero() {
            return Err(MarketDataError::NonPositiveDiscount {
                t: as_f64(t),
                df: as_f64(df),
            });
        }
        Ok(-df.ln() / t)
    }

    /// Instantaneous-compounding forward rate over `[t1, t2]`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::UnorderedTimes {
                start: as_f64(t1),
                end: as_f64(t2),
            });
        }
        Ok(-self.forward_discount(t1, t2)?.ln() / (t2 - t1))
    }
}
