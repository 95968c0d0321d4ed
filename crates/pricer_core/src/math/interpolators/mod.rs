//! Interpolation methods for numerical computation.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//!
//! ## Core Trait
//!
//! 1D interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: Value inside the domain
//! - `domain() -> (T, T)`: Valid interpolation range
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//! assert!(!interp.contains(3.5));
//!
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//!
//! // Outside the domain the end values are held flat
//! assert_eq!(interp.interpolate_flat(-1.0), 0.0);
//! ```

use crate::types::InterpolationError;
use num_traits::Float;

mod linear;

pub use linear::LinearInterpolator;

/// Interpolation over a fixed node set in one variable.
pub trait Interpolator<T: Float> {
    /// Node range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);

    /// Value at `x` inside the domain.
    ///
    /// # Errors
    /// `InterpolationError::OutOfBounds` outside [`domain`](Self::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Whether `x` lies in the closed node range.
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }

    /// Value at `x`, holding the end values flat outside the domain.
    fn interpolate_flat(&self, x: T) -> T {
        let (lo, hi) = self.domain();
        self.interpolate(x.max(lo).min(hi)).unwrap_or_else(|_| T::nan())
    }
}
