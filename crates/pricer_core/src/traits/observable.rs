//! Change notification between market inputs and cached valuations.
//!
//! Anything whose change must invalidate downstream results (index fixings,
//! the evaluation date) owns an [`Observable`]. Cached valuations register an
//! [`Observer`] with it and are flagged stale on every notification.
//!
//! Observers are held weakly, so dropping an instrument needs no explicit
//! unregistration; dead entries are pruned on the next notification.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use pricer_core::traits::{Observable, Observer};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Observer for Counter {
//!     fn update(&self) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let source = Observable::new();
//! let counter = Arc::new(Counter::default());
//! let as_observer: Arc<dyn Observer> = counter.clone();
//! source.register_observer(&as_observer);
//!
//! source.notify_observers();
//! assert_eq!(counter.0.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

/// Receiver of change notifications.
pub trait Observer: Send + Sync {
    /// Called whenever an observed input changes.
    fn update(&self);
}

/// Registry of observers interested in one input.
#[derive(Default)]
pub struct Observable {
    observers: RwLock<Vec<Weak<dyn Observer>>>,
}

impl Observable {
    /// Creates an observable with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`; registering the same observer twice is a no-op.
    pub fn register_observer(&self, observer: &Arc<dyn Observer>) {
        let weak = Arc::downgrade(observer);
        let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
        if !observers.iter().any(|o| o.ptr_eq(&weak)) {
            observers.push(weak);
        }
    }

    /// Removes `observer` if present.
    pub fn unregister_observer(&self, observer: &Arc<dyn Observer>) {
        let weak = Arc::downgrade(observer);
        let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
        observers.retain(|o| !o.ptr_eq(&weak));
    }

    /// Notifies every live observer and drops the dead ones.
    pub fn notify_observers(&self) {
        let live: Vec<Arc<dyn Observer>> = {
            let mut observers = self.observers.write().unwrap_or_else(|e| e.into_inner());
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        // Lock released before callbacks so observers may re-register.
        for observer in live {
            observer.update();
        }
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observer_count())
            .finish()
    }
}
