//! Discrete cash dividends.

use std::fmt;
use std::str::FromStr;

use super::super::error::InstrumentError;

/// Smallest separation, relative to the residual time, between an ex-time
/// and maturity or a positive ex-time and valuation.
pub const EX_TIME_RESOLUTION: f64 = 1.0e-12;

/// Cash dividend going ex at `time` years from valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dividend {
    /// Ex-dividend time in years.
    pub time: f64,
    /// Cash amount.
    pub amount: f64,
}

impl Dividend {
    /// Creates a dividend.
    pub fn new(time: f64, amount: f64) -> Self {
        Self { time, amount }
    }
}

/// Handling of a dividend going ex exactly on the valuation date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ValuationDateDividend {
    /// Reject the schedule.
    #[default]
    Reject,
    /// Ignore the dividend; the spot is taken to be ex-dividend already.
    Exclude,
    /// Apply the price jump after the last backward step.
    ApplyAtValuation,
}

impl fmt::Display for ValuationDateDividend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuationDateDividend::Reject => write!(f, "reject"),
            ValuationDateDividend::Exclude => write!(f, "exclude"),
            ValuationDateDividend::ApplyAtValuation => write!(f, "apply-at-valuation"),
        }
    }
}

impl FromStr for ValuationDateDividend {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(ValuationDateDividend::Reject),
            "exclude" => Ok(ValuationDateDividend::Exclude),
            "apply-at-valuation" | "apply" => Ok(ValuationDateDividend::ApplyAtValuation),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("unknown valuation-date dividend policy '{}'", s),
            }),
        }
    }
}

/// Ex-times strictly increasing, amounts non-negative.
///
/// # Examples
/// ```
/// use pricer_models::instruments::equity::{Dividend, DividendSchedule, ValuationDateDividend};
///
/// let schedule = DividendSchedule::new(vec![Dividend::new(0.25, 1.0), Dividend::new(0.75, 1.0)]).unwrap();
/// assert_eq!(schedule.len(), 2);
/// assert!(schedule.validate_within(1.0, ValuationDateDividend::Reject).is_ok());
/// assert!(schedule.validate_within(0.5, ValuationDateDividend::Reject).is_err());
///
/// assert!(DividendSchedule::new(vec![Dividend::new(0.5, 1.0), Dividend::new(0.5, 1.0)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividendSchedule {
    dividends: Vec<Dividend>,
}

impl DividendSchedule {
    /// Validates ordering and amounts.
    pub fn new(dividends: Vec<Dividend>) -> Result<Self, InstrumentError> {
        for (i, d) in dividends.iter().enumerate() {
            if !(d.time.is_finite() && d.time >= 0.0) {
                return Err(schedule_error(format!(
                    "dividend #{} has invalid ex-time {}",
                    i, d.time
                )));
            }
            if !(d.amount.is_finite() && d.amount >= 0.0) {
                return Err(schedule_error(format!(
                    "dividend #{} has invalid amount {}",
                    i, d.amount
                )));
            }
        }
        if let Some(i) = dividends.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(schedule_error(format!(
                "ex-times not strictly increasing at dividend #{}",
                i + 1
            )));
        }
        Ok(Self { dividends })
    }

    /// Schedule without dividends.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks that every ex-time lies in `(0, residual_time)`.
    ///
    /// A dividend at exactly `0` is accepted unless `policy` rejects it.
    /// Positive ex-times within [`EX_TIME_RESOLUTION`]` × residual_time` of
    /// valuation or maturity cannot be told apart from those dates and are
    /// rejected.
    pub fn validate_within(
        &self,
        residual_time: f64,
        policy: ValuationDateDividend,
    ) -> Result<(), InstrumentError> {
        let resolution = EX_TIME_RESOLUTION * residual_time;
        for (i, d) in self.dividends.iter().enumerate() {
            if d.time >= residual_time {
                return Err(schedule_error(format!(
                    "dividend #{} ex-time {} not before maturity {}",
                    i, d.time, residual_time
                )));
            }
            if residual_time - d.time <= resolution {
                return Err(schedule_error(format!(
                    "dividend #{} ex-time {} indistinguishable from maturity {}",
                    i, d.time, residual_time
                )));
            }
            if d.time > 0.0 && d.time <= resolution {
                return Err(schedule_error(format!(
                    "dividend #{} ex-time {} indistinguishable from the valuation date",
                    i, d.time
                )));
            }
            if d.time == 0.0 && policy == ValuationDateDividend::Reject {
                return Err(schedule_error(format!(
                    "dividend #{} goes ex on the valuation date",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Dividends in ex-time order.
    pub fn as_slice(&self) -> &[Dividend] {
        &self.dividends
    }

    /// Iterator in ex-time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Dividend> {
        self.dividends.iter()
    }

    /// Number of dividends.
    pub fn len(&self) -> usize {
        self.dividends.len()
    }

    /// Whether there are no dividends.
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty()
    }

    /// Sum of all amounts.
    pub fn total_amount(&self) -> f64 {
        self.dividends.iter().map(|d| d.amount).sum()
    }

    /// Checks that the dividends applied under `policy` sum to less than
    /// `spot`, so every shifted price stays positive.
    pub fn validate_against_spot(
        &self,
        spot: f64,
        policy: ValuationDateDividend,
    ) -> Result<(), InstrumentError> {
        let paid: f64 = self
            .dividends
            .iter()
            .filter(|d| d.time > 0.0 || policy != ValuationDateDividend::Exclude)
            .map(|d| d.amount)
            .sum();
        if paid >= spot {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "total dividends {} not below underlying {}",
                    paid, spot
                ),
            });
        }
        Ok(())
    }
}

fn schedule_error(message: String) -> InstrumentError {
    InstrumentError::DividendSchedule { message }
}
