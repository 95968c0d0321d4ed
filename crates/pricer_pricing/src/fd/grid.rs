//! Price grid and option values.

use super::error::FdError;

const STANDARD_DEVIATIONS: f64 = 4.0;
const MIN_HALF_WIDTH: f64 = 0.05;
const ANCHOR_MARGIN: f64 = 1.1;

/// Price coordinates with a parallel array of option values.
///
/// Coordinates are fixed for the grid's lifetime; only values change while
/// rolling back. The node at [`spot_index`](Self::spot_index) sits exactly on
/// the spot.
#[derive(Debug, Clone, PartialEq)]
pub struct FdGrid {
    prices: Vec<f64>,
    values: Vec<f64>,
    spot_index: usize,
}

impl FdGrid {
    /// Grid uniform in log-price, centred on `spot`.
    ///
    /// Spans `±4σ√T` in log space, widened symmetrically until every
    /// positive price in `anchors` (strike, dividend-adjusted spot) lies
    /// inside. `points` must be odd and at least 3.
    ///
    /// # Examples
    /// ```
    /// use pricer_pricing::fd::FdGrid;
    ///
    /// let grid = FdGrid::log_uniform(100.0, &[100.0], 0.2, 1.0, 101).unwrap();
    /// assert_eq!(grid.len(), 101);
    /// assert_eq!(grid.prices()[grid.spot_index()], 100.0);
    /// assert!(grid.prices()[0] < 50.0 && grid.prices()[100] > 200.0);
    /// ```
    pub fn log_uniform(
        spot: f64,
        anchors: &[f64],
        volatility: f64,
        residual_time: f64,
        points: usize,
    ) -> Result<Self, FdError> {
        if points < 3 || points % 2 == 0 {
            return Err(FdError::InvalidSetup(format!(
                "grid needs an odd number of points >= 3, got {}",
                points
            )));
        }
        if !(spot.is_finite() && spot > 0.0) {
            return Err(FdError::InvalidSetup(format!("spot must be positive, got {}", spot)));
        }

        let mut half_width = (STANDARD_DEVIATIONS * volatility * residual_time.sqrt())
            .max(MIN_HALF_WIDTH);
        for &anchor in anchors.iter().filter(|a| a.is_finite() && **a > 0.0) {
            half_width = half_width.max(ANCHOR_MARGIN * (anchor / spot).ln().abs());
        }

        let mid = points / 2;
        let dx = half_width / mid as f64;
        let prices = (0..points)
            .map(|i| {
                if i == mid {
                    spot
                } else {
                    spot * ((i as f64 - mid as f64) * dx).exp()
                }
            })
            .collect();
        Self::from_prices(prices, mid)
    }

    /// Grid on explicit coordinates.
    pub fn from_prices(prices: Vec<f64>, spot_index: usize) -> Result<Self, FdError> {
        if spot_index == 0 || spot_index + 1 >= prices.len() {
            return Err(FdError::InvalidSetup(format!(
                "spot node {} needs a neighbour on each side in a grid of {}",
                spot_index,
                prices.len()
            )));
        }
        if let Some(i) = prices
            .windows(2)
            .position(|w| !(w[0].is_finite() && w[1].is_finite() && w[1] > w[0]))
        {
            return Err(FdError::NonMonotoneGrid { index: i + 1 });
        }
        let values = vec![0.0; prices.len()];
        Ok(Self {
            prices,
            values,
            spot_index,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the grid has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price coordinates, strictly increasing.
    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Option values, one per coordinate.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable option values.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Coordinates and mutable values at once.
    #[inline]
    pub fn split_mut(&mut self) -> (&[f64], &mut [f64]) {
        (&self.prices, &mut self.values)
    }

    /// Index of the spot node.
    #[inline]
    pub fn spot_index(&self) -> usize {
        self.spot_index
    }

    /// Overwrites every value with `f(price)`.
    pub fn fill_with(&mut self, f: impl Fn(f64) -> f64) {
        for (v, &s) in self.values.iter_mut().zip(&self.prices) {
            *v = f(s);
        }
    }

    /// Value at the spot node.
    #[inline]
    pub fn spot_value(&self) -> f64 {
        self.values[self.spot_index]
    }

    /// Linearly interpolated value at `price`, flat beyond the ends.
    pub fn value_at(&self, price: f64) -> f64 {
        interpolate_on_grid(price, &self.prices, &self.values)
    }

    /// Delta and gamma from the spot node and its two neighbours.
    pub fn delta_gamma(&self) -> (f64, f64) {
        let i = self.spot_index;
        let (s, v) = (&self.prices, &self.values);
        let h_m = s[i] - s[i - 1];
        let h_p = s[i + 1] - s[i];

        let delta = (-h_p / (h_m * (h_m + h_p))) * v[i - 1]
            + ((h_p - h_m) / (h_m * h_p)) * v[i]
            + (h_m / (h_p * (h_m + h_p))) * v[i + 1];
        let gamma = 2.0
            * (v[i - 1] / (h_m * (h_m + h_p)) - v[i] / (h_m * h_p) + v[i + 1] / (h_p * (h_m + h_p)));
        (delta, gamma)
    }

    /// Fails on the first NaN or infinite value.
    pub fn check_finite(&self, time: f64) -> Result<(), FdError> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(node) => Err(FdError::NonFinite { node, time }),
            None => Ok(()),
        }
    }
}

/// Piecewise-linear interpolation on increasing `grid`, flat beyond the ends.
pub fn interpolate_on_grid(x: f64, grid: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(grid.len(), values.len());

    if x <= grid[0] {
        return values[0];
    }
    let n = grid.len() - 1;
    if x >= grid[n] {
        return values[n];
    }

    let hi = grid.partition_point(|&g| g < x).clamp(1, n);
    let lo = hi - 1;
    let w = (x - grid[lo]) / (grid[hi] - grid[lo]);
    (1.0 - w) * values[lo] + w * values[hi]
}
