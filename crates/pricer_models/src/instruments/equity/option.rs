//! Single-asset option priced on a finite-difference grid.
//!
//! Variants are composed rather than derived: a [`SingleAssetOption`] carries
//! its payoff parameters, a dividend schedule and the list of step
//! conditions the engine applies at every time layer.

use std::any::Any;
use std::fmt;

use pricer_core::traits::engine::{EngineArguments, EngineResults, InstrumentResults, SharedEngine};
use pricer_core::traits::{Instrument, Prototype, ValuationCache};
use pricer_core::types::PricingError;

use super::dividend::{DividendSchedule, ValuationDateDividend};
use super::params::OptionParams;
use crate::instruments::error::InstrumentError;

const MIN_GRID_POINTS: usize = 11;
const VEGA_BUMP: f64 = 1.0e-4;
const RHO_BUMP: f64 = 1.0e-4;

/// Grid mutation applied at each time layer.
///
/// Ordered so that sorting yields the application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StepConditionKind {
    /// Identity.
    None,
    /// Cash dividend price jumps.
    Dividend,
    /// Lock-in of the discounted intrinsic value.
    Shout,
}

impl fmt::Display for StepConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepConditionKind::None => write!(f, "none"),
            StepConditionKind::Dividend => write!(f, "dividend"),
            StepConditionKind::Shout => write!(f, "shout"),
        }
    }
}

/// Grid resolution and dividend handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FdSettings {
    /// Number of backward steps from maturity to valuation.
    pub time_steps: usize,
    /// Requested number of price nodes.
    pub grid_points: usize,
    /// What to do with a dividend going ex on the valuation date.
    pub valuation_date_dividend: ValuationDateDividend,
}

impl Default for FdSettings {
    fn default() -> Self {
        Self {
            time_steps: 100,
            grid_points: 101,
            valuation_date_dividend: ValuationDateDividend::Reject,
        }
    }
}

impl FdSettings {
    /// Creates settings with the default dividend policy.
    pub fn new(time_steps: usize, grid_points: usize) -> Self {
        Self {
            time_steps,
            grid_points,
            ..Self::default()
        }
    }

    /// Node count actually used: at least 11 and odd, so one node sits on
    /// the spot.
    pub fn effective_grid_points(&self) -> usize {
        let n = self.grid_points.max(MIN_GRID_POINTS);
        if n % 2 == 0 {
            n + 1
        } else {
            n
        }
    }

    /// Checks the step count.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if self.time_steps == 0 {
            return Err(InstrumentError::InvalidParameter {
                message: "time steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Arguments understood by finite-difference option engines.
#[derive(Debug, Clone, Default)]
pub struct OptionArguments {
    /// Payoff and market inputs.
    pub params: Option<OptionParams>,
    /// Discrete dividends.
    pub dividends: DividendSchedule,
    /// Step conditions in application order.
    pub conditions: Vec<StepConditionKind>,
    /// Grid resolution.
    pub settings: FdSettings,
}

impl EngineArguments for OptionArguments {
    fn validate(&self) -> Result<(), PricingError> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| PricingError::InvalidInput("option parameters not set".to_string()))?;
        params.validate()?;
        self.settings.validate()?;
        let policy = self.settings.valuation_date_dividend;
        self.dividends.validate_within(params.residual_time, policy)?;
        self.dividends.validate_against_spot(params.underlying, policy)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Value and spot greeks of a single-asset option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionResults {
    /// NPV and friends.
    pub base: InstrumentResults,
    /// First derivative with respect to spot.
    pub delta: Option<f64>,
    /// Second derivative with respect to spot.
    pub gamma: Option<f64>,
}

impl EngineResults for OptionResults {
    fn reset(&mut self) {
        self.base.reset();
        self.delta = None;
        self.gamma = None;
    }

    fn base(&self) -> &InstrumentResults {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// European option on one asset, optionally with cash dividends and a
/// shout right.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::equity::{
///     Dividend, DividendSchedule, FdSettings, OptionParams, SingleAssetOption, StepConditionKind,
/// };
/// use pricer_models::instruments::PayoffType;
///
/// let params = OptionParams::new(PayoffType::Call, 100.0, 100.0, 0.0, 0.05, 1.0, 0.2);
/// let dividends = DividendSchedule::new(vec![Dividend::new(0.5, 2.0)]).unwrap();
/// let option = SingleAssetOption::dividend_shout(params, dividends, FdSettings::default()).unwrap();
///
/// assert_eq!(
///     option.conditions(),
///     &[StepConditionKind::Dividend, StepConditionKind::Shout]
/// );
/// ```
#[derive(Debug)]
pub struct SingleAssetOption {
    params: OptionParams,
    dividends: DividendSchedule,
    conditions: Vec<StepConditionKind>,
    settings: FdSettings,
    delta: Option<f64>,
    gamma: Option<f64>,
    cache: ValuationCache,
    engine: Option<SharedEngine>,
}

impl SingleAssetOption {
    /// Creates an option with an arbitrary set of step conditions.
    ///
    /// Conditions are sorted into application order and deduplicated.
    ///
    /// # Errors
    /// `InvalidInput` for bad parameters or dividends summing to the spot
    /// or more, `NumericalInstability` for a dividend schedule not inside
    /// `(0, residual_time)`.
    pub fn new(
        params: OptionParams,
        dividends: DividendSchedule,
        mut conditions: Vec<StepConditionKind>,
        settings: FdSettings,
    ) -> Result<Self, PricingError> {
        params.validate()?;
        settings.validate()?;
        dividends.validate_within(params.residual_time, settings.valuation_date_dividend)?;
        dividends.validate_against_spot(params.underlying, settings.valuation_date_dividend)?;
        conditions.sort();
        conditions.dedup();

        Ok(Self {
            params,
            dividends,
            conditions,
            settings,
            delta: None,
            gamma: None,
            cache: ValuationCache::new(),
            engine: None,
        })
    }

    /// Plain European option.
    pub fn european(params: OptionParams, settings: FdSettings) -> Result<Self, PricingError> {
        Self::new(params, DividendSchedule::empty(), Vec::new(), settings)
    }

    /// European option on an underlying paying cash dividends.
    pub fn with_dividends(
        params: OptionParams,
        dividends: DividendSchedule,
        settings: FdSettings,
    ) -> Result<Self, PricingError> {
        Self::new(params, dividends, vec![StepConditionKind::Dividend], settings)
    }

    /// Shout option on an underlying paying cash dividends.
    pub fn dividend_shout(
        params: OptionParams,
        dividends: DividendSchedule,
        settings: FdSettings,
    ) -> Result<Self, PricingError> {
        Self::new(
            params,
            dividends,
            vec![StepConditionKind::Dividend, StepConditionKind::Shout],
            settings,
        )
    }

    /// Payoff and market inputs.
    pub fn params(&self) -> &OptionParams {
        &self.params
    }

    /// Discrete dividends.
    pub fn dividends(&self) -> &DividendSchedule {
        &self.dividends
    }

    /// Step conditions in application order.
    pub fn conditions(&self) -> &[StepConditionKind] {
        &self.conditions
    }

    /// Whether `kind` is among the step conditions.
    pub fn has_condition(&self, kind: StepConditionKind) -> bool {
        self.conditions.contains(&kind)
    }

    /// Grid resolution.
    pub fn settings(&self) -> &FdSettings {
        &self.settings
    }

    /// Spot delta from the grid.
    pub fn delta(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.cache.require(self.delta, "delta")
    }

    /// Spot gamma from the grid.
    pub fn gamma(&mut self) -> Result<f64, PricingError> {
        self.calculate()?;
        self.cache.require(self.gamma, "gamma")
    }

    /// Central-difference vega from two bumped duplicates.
    ///
    /// The option's own cache is left untouched.
    pub fn vega(&self) -> Result<f64, PricingError> {
        let up = self.bumped_npv(|p| p.volatility += VEGA_BUMP)?;
        let down = self.bumped_npv(|p| p.volatility -= VEGA_BUMP)?;
        Ok((up - down) / (2.0 * VEGA_BUMP))
    }

    /// Central-difference rho from two bumped duplicates.
    pub fn rho(&self) -> Result<f64, PricingError> {
        let up = self.bumped_npv(|p| p.risk_free_rate += RHO_BUMP)?;
        let down = self.bumped_npv(|p| p.risk_free_rate -= RHO_BUMP)?;
        Ok((up - down) / (2.0 * RHO_BUMP))
    }

    fn bumped_npv(&self, bump: impl FnOnce(&mut OptionParams)) -> Result<f64, PricingError> {
        let mut scenario = self.duplicate();
        bump(&mut scenario.params);
        scenario.params.validate()?;
        scenario.npv()
    }
}

impl Instrument for SingleAssetOption {
    fn instrument_type(&self) -> &'static str {
        "SingleAssetOption"
    }

    fn cache(&self) -> &ValuationCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut ValuationCache {
        &mut self.cache
    }

    fn pricing_engine(&self) -> Option<&SharedEngine> {
        self.engine.as_ref()
    }

    fn set_pricing_engine(&mut self, engine: SharedEngine) {
        self.engine = Some(engine);
        self.cache.invalidate();
    }

    fn is_expired(&self) -> bool {
        self.params.residual_time <= 0.0
    }

    fn setup_expired(&mut self) {
        self.cache.store_expired();
        self.delta = None;
        self.gamma = None;
    }

    fn setup_arguments(&self, arguments: &mut dyn EngineArguments) -> Result<bool, PricingError> {
        match arguments.downcast_mut::<OptionArguments>() {
            Some(args) => {
                args.params = Some(self.params);
                args.dividends = self.dividends.clone();
                args.conditions = self.conditions.clone();
                args.settings = self.settings;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn fetch_results(&mut self, results: &dyn EngineResults) -> Result<(), PricingError> {
        self.cache.store(results.base().clone());
        let greeks = results.downcast_ref::<OptionResults>();
        self.delta = greeks.and_then(|r| r.delta);
        self.gamma = greeks.and_then(|r| r.gamma);
        Ok(())
    }
}

impl Prototype for SingleAssetOption {
    fn duplicate(&self) -> Self {
        Self {
            params: self.params,
            dividends: self.dividends.clone(),
            conditions: self.conditions.clone(),
            settings: self.settings,
            delta: None,
            gamma: None,
            cache: ValuationCache::new(),
            engine: self.engine.clone(),
        }
    }
}
