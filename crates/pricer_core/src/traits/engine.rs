//! Pricing engine abstraction.
//!
//! An engine exposes an argument slot and a result slot whose concrete types
//! belong to one instrument family. Instruments only see them as
//! `dyn EngineArguments` / `dyn EngineResults` and recover the concrete type
//! with a checked downcast; a failed downcast means the engine does not know
//! the instrument and is never treated as a crash.
//!
//! # Examples
//!
//! ```
//! use pricer_core::traits::engine::{
//!     EngineArguments, EngineResults, GenericEngine, InstrumentResults, PricingEngine,
//! };
//! use pricer_core::types::PricingError;
//! use std::any::Any;
//!
//! #[derive(Debug, Default)]
//! struct ForwardArguments {
//!     forward: Option<f64>,
//! }
//!
//! impl EngineArguments for ForwardArguments {
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn as_any_mut(&mut self) -> &mut dyn Any { self }
//! }
//!
//! #[derive(Debug, Default)]
//! struct ForwardEngine {
//!     core: GenericEngine<ForwardArguments, InstrumentResults>,
//! }
//!
//! impl PricingEngine for ForwardEngine {
//!     fn name(&self) -> &'static str { "ForwardEngine" }
//!     fn arguments(&self) -> &dyn EngineArguments { &self.core.arguments }
//!     fn arguments_mut(&mut self) -> &mut dyn EngineArguments { &mut self.core.arguments }
//!     fn results(&self) -> &dyn EngineResults { &self.core.results }
//!     fn reset(&mut self) { self.core.results.reset() }
//!     fn calculate(&mut self) -> Result<(), PricingError> {
//!         self.core.results.value = self.core.arguments.forward;
//!         Ok(())
//!     }
//! }
//!
//! let mut engine = ForwardEngine::default();
//! let args = engine.arguments_mut().downcast_mut::<ForwardArguments>().unwrap();
//! args.forward = Some(101.5);
//! engine.calculate().unwrap();
//! assert_eq!(engine.results().base().value, Some(101.5));
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::types::error::PricingError;
use crate::types::time::Date;

/// Engine-family-specific inputs filled in by an instrument.
pub trait EngineArguments: Any + Send + fmt::Debug + 'static {
    /// Checks internal consistency before the engine runs.
    fn validate(&self) -> Result<(), PricingError> {
        Ok(())
    }

    /// Upcast used for checked downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast used for checked downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn EngineArguments {
    /// Returns the arguments as `T` when that is their concrete type.
    pub fn downcast_ref<T: EngineArguments>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: EngineArguments>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Engine-family-specific outputs read back by an instrument.
pub trait EngineResults: Any + Send + fmt::Debug + 'static {
    /// Clears every output to "unavailable".
    fn reset(&mut self);

    /// Outputs shared by every instrument family.
    fn base(&self) -> &InstrumentResults;

    /// Upcast used for checked downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl dyn EngineResults {
    /// Returns the results as `T` when that is their concrete type.
    pub fn downcast_ref<T: EngineResults>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Outputs common to all instruments.
///
/// `None` marks a value the engine did not produce, which is distinct from
/// a computed zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentResults {
    /// Net present value.
    pub value: Option<f64>,
    /// Estimated numerical error of `value`.
    pub error_estimate: Option<f64>,
    /// Date the valuation refers to.
    pub valuation_date: Option<Date>,
    /// Named engine-specific extras (greeks and diagnostics).
    pub additional_results: BTreeMap<String, f64>,
}

impl InstrumentResults {
    /// Clears every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EngineResults for InstrumentResults {
    fn reset(&mut self) {
        InstrumentResults::reset(self);
    }

    fn base(&self) -> &InstrumentResults {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Numerical procedure pricing one instrument family.
pub trait PricingEngine: Send + fmt::Debug {
    /// Short engine name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Argument slot.
    fn arguments(&self) -> &dyn EngineArguments;

    /// Mutable argument slot, filled by the instrument.
    fn arguments_mut(&mut self) -> &mut dyn EngineArguments;

    /// Result slot, read by the instrument.
    fn results(&self) -> &dyn EngineResults;

    /// Clears the result slot before a new run.
    fn reset(&mut self);

    /// Computes results from the current arguments.
    fn calculate(&mut self) -> Result<(), PricingError>;
}

/// Argument and result storage embedded by concrete engines.
#[derive(Debug, Default, Clone)]
pub struct GenericEngine<A, R> {
    /// Argument slot.
    pub arguments: A,
    /// Result slot.
    pub results: R,
}

/// Engine handle shared between instruments.
///
/// The mutex serialises use of the argument and result slots, so one engine
/// can serve several instruments, each calculation running to completion
/// before the next starts.
pub type SharedEngine = Arc<Mutex<dyn PricingEngine>>;

/// Wraps a concrete engine into a [`SharedEngine`].
pub fn share<E: PricingEngine + 'static>(engine: E) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}
