//! Theta time-stepping schemes.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::error::FdError;
use super::operator::{solve_tridiagonal_inplace, BlackScholesOperator};

/// Fraction of the stability limit used when sub-stepping.
const CFL_SAFETY_FACTOR: f64 = 0.95;

/// Time-stepping policy.
///
/// Each scheme is a theta method: `(I − θΔtL) Vₙ = (I + (1 − θ)ΔtL) Vₙ₊₁`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FdScheme {
    /// Forward Euler, θ = 0. Conditionally stable.
    Explicit,
    /// Backward Euler, θ = 1.
    Implicit,
    /// θ = ½.
    #[default]
    CrankNicolson,
}

impl FdScheme {
    /// Weight of the implicit part.
    pub fn theta(self) -> f64 {
        match self {
            FdScheme::Explicit => 0.0,
            FdScheme::Implicit => 1.0,
            FdScheme::CrankNicolson => 0.5,
        }
    }
}

impl fmt::Display for FdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FdScheme::Explicit => write!(f, "explicit"),
            FdScheme::Implicit => write!(f, "implicit"),
            FdScheme::CrankNicolson => write!(f, "crank-nicolson"),
        }
    }
}

impl FromStr for FdScheme {
    type Err = FdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(FdScheme::Explicit),
            "implicit" => Ok(FdScheme::Implicit),
            "cn" | "crank-nicolson" | "cranknicolson" => Ok(FdScheme::CrankNicolson),
            other => Err(FdError::InvalidSetup(format!("unknown scheme: {}", other))),
        }
    }
}

/// Largest stable step of a theta scheme with `θ < ½` on `operator`.
///
/// Uses `Δt (1 − 2θ) max|Lᵢᵢ| ≤ 1` over the interior rows, scaled by
/// [`CFL_SAFETY_FACTOR`]. `None` when the scheme is unconditionally stable.
pub fn stable_time_step(operator: &BlackScholesOperator, theta: f64) -> Option<f64> {
    if theta >= 0.5 || operator.len() < 3 {
        return None;
    }
    let n = operator.len();
    let rate = operator.diag()[1..n - 1]
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(-d));
    if rate <= 1.0e-14 {
        return None;
    }
    Some(CFL_SAFETY_FACTOR / ((1.0 - 2.0 * theta) * rate))
}

/// One-layer backward stepper with Neumann boundaries.
///
/// The boundary slopes are fixed at construction; rows `0` and `n − 1` of
/// the system impose `V₁ − V₀ = s_lo h₀` and `Vₙ₋₁ − Vₙ₋₂ = s_hi hₙ₋₂`.
///
/// Conditionally stable schemes split each requested step into equal
/// sub-steps no longer than [`stable_time_step`].
#[derive(Debug, Clone)]
pub struct ThetaStepper {
    operator: BlackScholesOperator,
    theta: f64,
    max_dt: Option<f64>,
    lower_slope: f64,
    upper_slope: f64,
    h_first: f64,
    h_last: f64,
    lower: Vec<f64>,
    diag: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
    c_star: Vec<f64>,
    d_star: Vec<f64>,
    solution: Vec<f64>,
}

impl ThetaStepper {
    /// Creates a stepper over `prices`.
    pub fn new(
        operator: BlackScholesOperator,
        prices: &[f64],
        scheme: FdScheme,
        lower_slope: f64,
        upper_slope: f64,
    ) -> Result<Self, FdError> {
        let n = prices.len();
        if n < 3 || operator.len() != n {
            return Err(FdError::InvalidSetup(format!(
                "stepper needs matching operator and at least 3 nodes, got {} and {}",
                operator.len(),
                n
            )));
        }
        let theta = scheme.theta();
        let max_dt = stable_time_step(&operator, theta);
        if let Some(limit) = max_dt {
            debug!(scheme = %scheme, max_dt = limit, "conditionally stable scheme, sub-stepping");
        }
        Ok(Self {
            operator,
            theta,
            max_dt,
            lower_slope,
            upper_slope,
            h_first: prices[1] - prices[0],
            h_last: prices[n - 1] - prices[n - 2],
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
            rhs: vec![0.0; n],
            c_star: vec![0.0; n],
            d_star: vec![0.0; n],
            solution: vec![0.0; n],
        })
    }

    /// Stability limit on a single sub-step, if any.
    pub fn max_time_step(&self) -> Option<f64> {
        self.max_dt
    }

    /// Steps `values` back by `dt`.
    pub fn step(&mut self, values: &mut [f64], dt: f64) -> Result<(), FdError> {
        let n = self.operator.len();
        if values.len() != n {
            return Err(FdError::InvalidSetup(format!(
                "expected {} values, got {}",
                n,
                values.len()
            )));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FdError::InvalidSetup(format!("time step must be positive, got {}", dt)));
        }
        let substeps = match self.max_dt {
            Some(limit) if dt > limit => (dt / limit).ceil() as usize,
            _ => 1,
        };
        let h = dt / substeps as f64;
        for _ in 0..substeps {
            self.advance(values, h)?;
        }
        Ok(())
    }

    fn advance(&mut self, values: &mut [f64], dt: f64) -> Result<(), FdError> {
        let n = values.len();
        let implicit = self.theta * dt;
        let explicit = (1.0 - self.theta) * dt;

        for i in 1..n - 1 {
            self.rhs[i] = values[i] + explicit * self.operator.apply_row(i, values);
            self.lower[i] = -implicit * self.operator.lower()[i];
            self.diag[i] = 1.0 - implicit * self.operator.diag()[i];
            self.upper[i] = -implicit * self.operator.upper()[i];
        }

        self.lower[0] = 0.0;
        self.diag[0] = 1.0;
        self.upper[0] = -1.0;
        self.rhs[0] = -self.lower_slope * self.h_first;

        self.lower[n - 1] = -1.0;
        self.diag[n - 1] = 1.0;
        self.upper[n - 1] = 0.0;
        self.rhs[n - 1] = self.upper_slope * self.h_last;

        solve_tridiagonal_inplace(
            &self.lower,
            &self.diag,
            &self.upper,
            &self.rhs,
            &mut self.c_star,
            &mut self.d_star,
            &mut self.solution,
        )?;
        values.copy_from_slice(&self.solution);
        Ok(())
    }
}
