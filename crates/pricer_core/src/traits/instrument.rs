//! Lazily valued instruments.
//!
//! An [`Instrument`] owns a [`ValuationCache`] and an optional engine. Asking
//! for any result runs [`Instrument::calculate`], which is a no-op while the
//! cache is valid. Otherwise the instrument fills the engine's argument slot,
//! lets the engine compute, and copies the engine's results back. The cache
//! stays valid until an observed input (index fixing, evaluation date) notifies
//! it or a new engine is attached.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::engine::{EngineArguments, EngineResults, InstrumentResults, SharedEngine};
use super::observable::{Observable, Observer};
use crate::types::error::PricingError;
use crate::types::time::Date;

#[derive(Debug, Default)]
struct CacheFlag {
    valid: AtomicBool,
}

impl Observer for CacheFlag {
    fn update(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

/// Cached base results and validity flag of one instrument.
///
/// Each instrument owns its cache exclusively; duplicates get a fresh one.
pub struct ValuationCache {
    flag: Arc<CacheFlag>,
    results: InstrumentResults,
    rejected_by: Option<&'static str>,
}

impl ValuationCache {
    /// Creates an invalid, empty cache.
    pub fn new() -> Self {
        Self {
            flag: Arc::new(CacheFlag::default()),
            results: InstrumentResults::default(),
            rejected_by: None,
        }
    }

    /// Whether cached results can be returned without recomputation.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.flag.valid.load(Ordering::Acquire)
    }

    /// Forces recomputation on next access.
    #[inline]
    pub fn invalidate(&self) {
        self.flag.valid.store(false, Ordering::Release);
    }

    /// Marks the cache as up to date.
    #[inline]
    pub fn mark_valid(&self) {
        self.flag.valid.store(true, Ordering::Release);
    }

    /// Observer handle to register with upstream inputs.
    pub fn observer(&self) -> Arc<dyn Observer> {
        self.flag.clone()
    }

    /// Subscribes the cache to `source`.
    pub fn register_with(&self, source: &Observable) {
        source.register_observer(&self.observer());
    }

    /// Cached base results.
    pub fn results(&self) -> &InstrumentResults {
        &self.results
    }

    /// Replaces the cached base results.
    pub fn store(&mut self, results: InstrumentResults) {
        self.results = results;
    }

    /// Results of an instrument past maturity: zero value, nothing else.
    pub fn store_expired(&mut self) {
        self.results.reset();
        self.results.value = Some(0.0);
        self.rejected_by = None;
    }

    /// Records which engine (if any) refused the instrument on the last run.
    pub fn set_rejected_by(&mut self, engine: Option<&'static str>) {
        self.rejected_by = engine;
    }

    /// Name of the engine that refused the instrument on the last run.
    pub fn rejected_by(&self) -> Option<&'static str> {
        self.rejected_by
    }

    /// Turns an optional output into a result.
    ///
    /// A missing value is `UnsupportedInstrument` when the engine refused the
    /// instrument, `NotAvailable` otherwise.
    pub fn require<T>(&self, value: Option<T>, what: &str) -> Result<T, PricingError> {
        value.ok_or_else(|| match self.rejected_by {
            Some(engine) => {
                PricingError::UnsupportedInstrument(format!("{} cannot provide {}", engine, what))
            }
            None => PricingError::NotAvailable(what.to_string()),
        })
    }
}

impl Default for ValuationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValuationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuationCache")
            .field("valid", &self.is_valid())
            .field("results", &self.results)
            .field("rejected_by", &self.rejected_by)
            .finish()
    }
}

/// Valuable contract whose results are computed by a pluggable engine.
///
/// Implementors provide storage and the argument/result mapping; the
/// provided methods implement the lazy calculate-then-read protocol.
pub trait Instrument {
    /// Human-readable instrument kind, used in logs and errors.
    fn instrument_type(&self) -> &'static str;

    /// Valuation cache.
    fn cache(&self) -> &ValuationCache;

    /// Mutable valuation cache.
    fn cache_mut(&mut self) -> &mut ValuationCache;

    /// Currently attached engine.
    fn pricing_engine(&self) -> Option<&SharedEngine>;

    /// Attaches `engine`, replacing any previous one. Implementations must
    /// invalidate the cache.
    fn set_pricing_engine(&mut self, engine: SharedEngine);

    /// Whether the instrument has no remaining cash flows.
    fn is_expired(&self) -> bool;

    /// Fills outputs for an expired instrument without calling an engine.
    fn setup_expired(&mut self) {
        self.cache_mut().store_expired();
    }

    /// Fills the engine's argument slot.
    ///
    /// Returns `Ok(false)` when the slot has a type this instrument cannot
    /// fill, meaning the engine does not price it.
    fn setup_arguments(&self, arguments: &mut dyn EngineArguments) -> Result<bool, PricingError>;

    /// Copies results back from the engine's result slot.
    fn fetch_results(&mut self, results: &dyn EngineResults) -> Result<(), PricingError> {
        self.cache_mut().store(results.base().clone());
        Ok(())
    }

    /// Runs the attached engine once.
    fn perform_calculations(&mut self) -> Result<(), PricingError> {
        let engine = self
            .pricing_engine()
            .cloned()
            .ok_or_else(|| PricingError::MissingEngine(self.instrument_type().to_string()))?;
        let mut engine = engine
            .lock()
            .map_err(|_| PricingError::ModelFailure("pricing engine mutex poisoned".to_string()))?;

        engine.reset();
        if self.setup_arguments(engine.arguments_mut())? {
            engine.arguments().validate()?;
            debug!(
                instrument = self.instrument_type(),
                engine = engine.name(),
                "running pricing engine"
            );
            engine.calculate()?;
            self.cache_mut().set_rejected_by(None);
        } else {
            warn!(
                instrument = self.instrument_type(),
                engine = engine.name(),
                "engine does not support instrument"
            );
            self.cache_mut().set_rejected_by(Some(engine.name()));
        }
        self.fetch_results(engine.results())
    }

    /// Brings cached results up to date.
    fn calculate(&mut self) -> Result<(), PricingError> {
        if self.cache().is_valid() {
            trace!(instrument = self.instrument_type(), "valuation cache hit");
            return Ok(());
        }
        // Marked first so a notification arriving mid-run keeps it stale.
        self.cache().mark_valid();
        let outcome = if self.is_expired() {
            debug!(instrument = self.instrument_type(), "instrument expired");
            self.setup_expired();
            Ok(())
        } else {
            self.perform_calculations()
        };
        if outcome.is_err() {
            self.cache().invalidate();
        }
        outcome
    }

    /// Discards cached results and calculates again.
    fn recalculate(&mut self) -> Result<(), PricingError> {
        self.cache().invalidate();
        self.calculate()
    }

    /// Net present value.
    fn npv(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        let cache = self.cache();
        cache.require(cache.results().value, "NPV")
    }

    /// Numerical error estimate of the NPV.
    fn error_estimate(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        let cache = self.cache();
        cache.require(cache.results().error_estimate, "error estimate")
    }

    /// Date the valuation refers to.
    fn valuation_date(&mut self) -> Result<Date, PricingError> {
        self.calculate()?;
        let cache = self.cache();
        cache.require(cache.results().valuation_date, "valuation date")
    }

    /// Named additional result such as `"delta"`.
    fn result(&mut self, name: &str) -> Result<f64, PricingError> {
        self.calculate()?;
        let cache = self.cache();
        cache.require(cache.results().additional_results.get(name).copied(), name)
    }
}

/// Independent copies of an instrument.
///
/// The duplicate shares immutable configuration and market handles but owns
/// a fresh, invalid cache registered with the same inputs.
pub trait Prototype {
    /// Returns an independent copy.
    fn duplicate(&self) -> Self
    where
        Self: Sized;
}
