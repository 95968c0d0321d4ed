//! Shared evaluation date.
//!
//! Instruments decide expiry and engines discount relative to one evaluation
//! date shared through an `Arc`. Moving it notifies every registered
//! valuation so stale results are recomputed on next access.

use std::sync::RwLock;

use super::time::Date;
use crate::traits::observable::Observable;

/// Observable evaluation date.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Date, EvaluationDate};
///
/// let today = EvaluationDate::new(Date::from_ymd(2024, 1, 15).unwrap());
/// today.set(Date::from_ymd(2024, 2, 1).unwrap());
/// assert_eq!(today.get(), Date::from_ymd(2024, 2, 1).unwrap());
/// ```
#[derive(Debug)]
pub struct EvaluationDate {
    date: RwLock<Date>,
    observable: Observable,
}

impl EvaluationDate {
    /// Creates an evaluation date.
    pub fn new(date: Date) -> Self {
        Self {
            date: RwLock::new(date),
            observable: Observable::new(),
        }
    }

    /// Current evaluation date.
    pub fn get(&self) -> Date {
        *self.date.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves the evaluation date; observers are notified only on an actual change.
    pub fn set(&self, date: Date) {
        let changed = {
            let mut current = self.date.write().unwrap_or_else(|e| e.into_inner());
            let changed = *current != date;
            *current = date;
            changed
        };
        if changed {
            tracing::debug!(%date, "evaluation date moved");
            self.observable.notify_observers();
        }
    }

    /// Observable notified on date changes.
    pub fn observable(&self) -> &Observable {
        &self.observable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::observable::Observer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl Observer for Counter {
        fn update(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_set_same_date_does_not_notify() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        let eval = EvaluationDate::new(date);
        let counter = Arc::new(Counter::default());
        let observer: Arc<dyn Observer> = counter.clone();
        eval.observable().register_observer(&observer);

        eval.set(date);
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);

        eval.set(Date::from_ymd(2024, 1, 16).unwrap());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
