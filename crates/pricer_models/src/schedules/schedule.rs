//! Schedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use super::frequency::Frequency;
use pricer_core::types::time::{BusinessDayConvention, Date};

/// Ordered boundary dates of consecutive accrual periods.
///
/// Dates are already business-day adjusted. Period `i` runs from
/// `dates[i]` to `dates[i + 1]`.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, Schedule};
/// use pricer_core::types::time::{BusinessDayConvention, Date};
///
/// let schedule = Schedule::new(
///     vec![
///         Date::from_ymd(2024, 1, 15).unwrap(),
///         Date::from_ymd(2024, 4, 15).unwrap(),
///         Date::from_ymd(2024, 7, 15).unwrap(),
///     ],
///     Frequency::Quarterly,
///     BusinessDayConvention::Following,
/// )
/// .unwrap();
///
/// let periods: Vec<_> = schedule.periods().collect();
/// assert_eq!(periods.len(), 2);
/// assert_eq!(periods[1].0, Date::from_ymd(2024, 4, 15).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    dates: Vec<Date>,
    tenor: Frequency,
    convention: BusinessDayConvention,
}

impl Schedule {
    /// Creates a schedule from explicit boundary dates.
    ///
    /// # Errors
    /// - `NoPeriods` with fewer than two dates
    /// - `NotIncreasing` if the dates are not strictly increasing
    pub fn new(
        dates: Vec<Date>,
        tenor: Frequency,
        convention: BusinessDayConvention,
    ) -> Result<Self, ScheduleError> {
        if dates.len() < 2 {
            return Err(ScheduleError::NoPeriods { got: dates.len() });
        }
        if let Some(i) = dates.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ScheduleError::NotIncreasing {
                index: i + 1,
                date: dates[i + 1],
            });
        }
        Ok(Self {
            dates,
            tenor,
            convention,
        })
    }

    /// Boundary dates.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of boundary dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; a schedule holds at least two dates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `(accrual start, accrual end)` for each period.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// First boundary date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// Last boundary date.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Period tenor.
    #[inline]
    pub fn tenor(&self) -> Frequency {
        self.tenor
    }

    /// Convention used to adjust the dates.
    #[inline]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.convention
    }
}

/// Builder generating a regular schedule forward from the start date.
///
/// Unadjusted dates are `start + k * tenor` (a short final stub ends at
/// `end`), each rolled by the business-day convention.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{ScheduleBuilder, Frequency};
/// use pricer_core::types::time::Date;
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .end(Date::from_ymd(2024, 12, 15).unwrap())
///     .frequency(Frequency::Quarterly)
///     .build()
///     .unwrap();
///
/// // Three full quarters and a two-month stub
/// assert_eq!(schedule.periods().count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    convention: BusinessDayConvention,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a builder; the default convention is Modified Following.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: None,
            convention: BusinessDayConvention::ModifiedFollowing,
        }
    }

    /// Sets the start date of the schedule.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date of the schedule.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the period frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sets the business-day convention.
    pub fn convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Builds the schedule.
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let mut unadjusted = vec![start];
        let mut k = 1;
        loop {
            let next = start
                .add_months(k * frequency.months())
                .map_err(|e| ScheduleError::DateOverflow {
                    reason: e.to_string(),
                })?;
            if next >= end {
                break;
            }
            unadjusted.push(next);
            k += 1;
        }
        unadjusted.push(end);

        let mut dates: Vec<Date> = Vec::with_capacity(unadjusted.len());
        for date in unadjusted {
            let adjusted =
                self.convention
                    .adjust(date)
                    .map_err(|e| ScheduleError::DateOverflow {
                        reason: e.to_string(),
                    })?;
            if dates.last().map_or(true, |&last| adjusted > last) {
                dates.push(adjusted);
            }
        }

        Schedule::new(dates, frequency, self.convention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_builder_adjusts_weekend_dates() {
        // 2024-06-15 is a Saturday
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 3, 15))
            .end(d(2024, 9, 15))
            .frequency(Frequency::Quarterly)
            .convention(BusinessDayConvention::Following)
            .build()
            .unwrap();

        assert_eq!(
            schedule.dates(),
            &[d(2024, 3, 15), d(2024, 6, 17), d(2024, 9, 16)]
        );
        assert_eq!(schedule.business_day_convention(), BusinessDayConvention::Following);
        assert_eq!(schedule.tenor(), Frequency::Quarterly);
    }

    #[test]
    fn test_builder_month_end_clamping() {
        let schedule = ScheduleBuilder::new()
            .start(d(2024, 1, 31))
            .end(d(2024, 4, 30))
            .frequency(Frequency::Monthly)
            .convention(BusinessDayConvention::Unadjusted)
            .build()
            .unwrap();
        assert_eq!(
            schedule.dates(),
            &[d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]
        );
    }

    #[test]
    fn test_builder_errors() {
        assert!(matches!(
            ScheduleBuilder::new().end(d(2025, 1, 1)).build(),
            Err(ScheduleError::MissingField { field: "start" })
        ));
        assert!(matches!(
            ScheduleBuilder::new()
                .start(d(2025, 1, 1))
                .end(d(2024, 1, 1))
                .frequency(Frequency::Annual)
                .build(),
            Err(ScheduleError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_new_rejects_unordered_dates() {
        let err = Schedule::new(
            vec![d(2024, 1, 1), d(2024, 1, 1)],
            Frequency::Monthly,
            BusinessDayConvention::Unadjusted,
        )
        .unwrap_err();
        assert!(matches!(err, ScheduleError::NotIncreasing { index: 1, .. }));
        assert!(matches!(
            Schedule::new(vec![d(2024, 1, 1)], Frequency::Monthly, BusinessDayConvention::Unadjusted),
            Err(ScheduleError::NoPeriods { got: 1 })
        ));
    }
}
