//! Accrual schedules for floating legs.
//!
//! A [`Schedule`] is the adjusted boundary dates of a leg's accrual periods,
//! rolled forward from the start date by one [`Frequency`] at a time. The
//! final period may be short when the tenor does not divide the term.
//!
//! ```
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::time::{BusinessDayConvention, Date};
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .end(Date::from_ymd(2026, 1, 15).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .convention(BusinessDayConvention::ModifiedFollowing)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.periods().count(), 4);
//! ```

mod error;
mod frequency;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use schedule::{Schedule, ScheduleBuilder};
