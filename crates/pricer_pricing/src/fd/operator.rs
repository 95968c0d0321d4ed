//! Black-Scholes spatial operator and tridiagonal solver.

use super::error::FdError;

const PIVOT_EPSILON: f64 = 1.0e-14;

/// Three-point discretisation of
/// `½σ²S² ∂²V/∂S² + (r − q)S ∂V/∂S − rV` on a non-uniform price grid.
///
/// Rows `0` and `n − 1` are left empty; boundary rows are set by the
/// time stepper.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackScholesOperator {
    lower: Vec<f64>,
    diag: Vec<f64>,
    upper: Vec<f64>,
}

impl BlackScholesOperator {
    /// Builds the coefficients on `prices`.
    pub fn new(prices: &[f64], rate: f64, dividend_yield: f64, volatility: f64) -> Self {
        let n = prices.len();
        let mut lower = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut upper = vec![0.0; n];

        for i in 1..n.saturating_sub(1) {
            let s = prices[i];
            let h_m = prices[i] - prices[i - 1];
            let h_p = prices[i + 1] - prices[i];

            let d1_m = -h_p / (h_m * (h_m + h_p));
            let d1_0 = (h_p - h_m) / (h_m * h_p);
            let d1_p = h_m / (h_p * (h_m + h_p));

            let d2_m = 2.0 / (h_m * (h_m + h_p));
            let d2_0 = -2.0 / (h_m * h_p);
            let d2_p = 2.0 / (h_p * (h_m + h_p));

            let diffusion = 0.5 * volatility * volatility * s * s;
            let drift = (rate - dividend_yield) * s;

            lower[i] = diffusion * d2_m + drift * d1_m;
            diag[i] = diffusion * d2_0 + drift * d1_0 - rate;
            upper[i] = diffusion * d2_p + drift * d1_p;
        }

        Self { lower, diag, upper }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Whether the operator has no rows.
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Sub-diagonal.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Diagonal.
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    /// Super-diagonal.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// `(L v)_i` for an interior row.
    #[inline]
    pub fn apply_row(&self, i: usize, v: &[f64]) -> f64 {
        self.lower[i] * v[i - 1] + self.diag[i] * v[i] + self.upper[i] * v[i + 1]
    }
}

/// Thomas algorithm with caller-provided scratch buffers.
///
/// Solves `lower[i] x[i-1] + diag[i] x[i] + upper[i] x[i+1] = rhs[i]`,
/// writing the solution into `out`.
pub fn solve_tridiagonal_inplace(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
    c_star: &mut [f64],
    d_star: &mut [f64],
    out: &mut [f64],
) -> Result<(), FdError> {
    let n = diag.len();
    if n == 0 {
        return Ok(());
    }
    if lower.len() != n
        || upper.len() != n
        || rhs.len() != n
        || c_star.len() != n
        || d_star.len() != n
        || out.len() != n
    {
        return Err(FdError::InvalidSetup(
            "tridiagonal input lengths must match".to_string(),
        ));
    }

    if diag[0].abs() <= PIVOT_EPSILON {
        return Err(FdError::SingularSystem { row: 0 });
    }
    c_star[0] = if n > 1 { upper[0] / diag[0] } else { 0.0 };
    d_star[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = diag[i] - lower[i] * c_star[i - 1];
        if denom.abs() <= PIVOT_EPSILON {
            return Err(FdError::SingularSystem { row: i });
        }
        c_star[i] = if i < n - 1 { upper[i] / denom } else { 0.0 };
        d_star[i] = (rhs[i] - lower[i] * d_star[i - 1]) / denom;
    }

    out[n - 1] = d_star[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = d_star[i] - c_star[i] * out[i + 1];
    }
    Ok(())
}
