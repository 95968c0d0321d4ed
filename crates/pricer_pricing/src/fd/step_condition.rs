//! Grid mutations applied at time layers.
//!
//! Conditions see the layer after the scheme step, indexed by the time from
//! valuation. A condition must leave the layer unchanged when applied twice
//! at the same time.

use std::fmt;

use pricer_models::instruments::equity::Dividend;

use super::error::FdError;
use super::grid::{interpolate_on_grid, FdGrid};

const TIME_TOLERANCE: f64 = 1.0e-10;

/// Mutation of grid values at a time layer.
pub trait StepCondition: fmt::Debug + Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies the condition to the layer at `time`.
    fn apply_to(&mut self, grid: &mut FdGrid, time: f64) -> Result<(), FdError>;
}

/// Identity condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCondition;

impl StepCondition for NullCondition {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply_to(&mut self, _grid: &mut FdGrid, _time: f64) -> Result<(), FdError> {
        Ok(())
    }
}

/// Cash dividend jumps.
///
/// At an ex-date the value at price `S` becomes the value at `S − D`
/// interpolated on the unchanged coordinates. Each dividend fires once.
#[derive(Debug, Clone)]
pub struct DividendCondition {
    dividends: Vec<Dividend>,
    applied: Vec<bool>,
    scratch: Vec<f64>,
}

impl DividendCondition {
    /// Creates the condition for the given dividends.
    pub fn new(dividends: &[Dividend]) -> Self {
        Self {
            dividends: dividends.to_vec(),
            applied: vec![false; dividends.len()],
            scratch: Vec::new(),
        }
    }

    /// Dividends whose jump has been applied.
    pub fn applied_count(&self) -> usize {
        self.applied.iter().filter(|a| **a).count()
    }
}

impl StepCondition for DividendCondition {
    fn name(&self) -> &'static str {
        "dividend"
    }

    fn apply_to(&mut self, grid: &mut FdGrid, time: f64) -> Result<(), FdError> {
        for (dividend, applied) in self.dividends.iter().zip(self.applied.iter_mut()) {
            if *applied || (dividend.time - time).abs() > TIME_TOLERANCE {
                continue;
            }
            let (prices, values) = grid.split_mut();
            self.scratch.clear();
            self.scratch.extend(
                prices
                    .iter()
                    .map(|s| interpolate_on_grid(s - dividend.amount, prices, values)),
            );
            values.copy_from_slice(&self.scratch);
            *applied = true;
            tracing::trace!(time, amount = dividend.amount, "dividend jump applied");
        }
        Ok(())
    }
}

/// Lock-in of the intrinsic value.
///
/// Node values become `max(continuation, e^{r(T − t)} · intrinsic)`: the
/// intrinsic value at the node, compounded from `t` to maturity. Intrinsic
/// values are the terminal payoff on the grid. Applied at every layer.
#[derive(Debug, Clone)]
pub struct ShoutCondition {
    intrinsic: Vec<f64>,
    residual_time: f64,
    rate: f64,
}

impl ShoutCondition {
    /// Creates the condition from the intrinsic value at each node.
    pub fn new(intrinsic: Vec<f64>, residual_time: f64, rate: f64) -> Self {
        Self {
            intrinsic,
            residual_time,
            rate,
        }
    }
}

impl StepCondition for ShoutCondition {
    fn name(&self) -> &'static str {
        "shout"
    }

    fn apply_to(&mut self, grid: &mut FdGrid, time: f64) -> Result<(), FdError> {
        if self.intrinsic.len() != grid.len() {
            return Err(FdError::InvalidSetup(format!(
                "shout condition built for {} nodes, grid has {}",
                self.intrinsic.len(),
                grid.len()
            )));
        }
        let growth = (self.rate * (self.residual_time - time)).exp();
        for (value, intrinsic) in grid.values_mut().iter_mut().zip(&self.intrinsic) {
            *value = value.max(growth * intrinsic);
        }
        Ok(())
    }
}
