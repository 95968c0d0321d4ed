//! Core traits for instruments, engines and change notification.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait) used by curves and interpolators
//! - The instrument/engine contract (`instrument`, `engine`)
//! - Observer registration for cache invalidation (`observable`)
//!
//! Engines are dispatched dynamically: an instrument reaches its engine
//! through `Arc<Mutex<dyn PricingEngine>>` and exchanges data through
//! checked downcasts of the engine's argument and result slots.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod engine;
pub mod instrument;
pub mod observable;

pub use engine::{
    share, EngineArguments, EngineResults, GenericEngine, InstrumentResults, PricingEngine,
    SharedEngine,
};
pub use instrument::{Instrument, Prototype, ValuationCache};
pub use observable::{Observable, Observer};
