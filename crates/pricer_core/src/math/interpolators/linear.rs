//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator over strictly increasing nodes.
///
/// # Examples
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[1.0, 2.0], &[10.0, 20.0]).unwrap();
/// assert_eq!(interp.interpolate(1.25).unwrap(), 12.5);
/// assert!(interp.interpolate(3.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Builds an interpolator; `xs` must be strictly increasing.
    ///
    /// # Errors
    /// - `InvalidInput` if lengths differ
    /// - `InsufficientData` if fewer than two nodes
    /// - `NonMonotonicData` if `xs` is not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        if let Some(index) = xs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Node abscissas.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Node values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        pos.clamp(1, self.xs.len() - 1) - 1
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_nodes_are_reproduced() {
        let xs = [0.0, 1.0, 2.0, 4.0];
        let ys = [1.0, 3.0, 2.0, 6.0];
        let interp = LinearInterpolator::new(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(interp.interpolate(*x).unwrap(), *y);
        }
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), 4.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            LinearInterpolator::new(&[0.0], &[1.0]),
            Err(InterpolationError::InsufficientData { got: 1, need: 2 })
        ));
        assert!(matches!(
            LinearInterpolator::new(&[0.0, 1.0], &[1.0]),
            Err(InterpolationError::InvalidInput(_))
        ));
        assert!(matches!(
            LinearInterpolator::new(&[0.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(InterpolationError::NonMonotonicData { index: 2 })
        ));
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = LinearInterpolator::new(&[1.0, 2.0], &[5.0, 7.0]).unwrap();
        assert_eq!(interp.interpolate_flat(0.0), 5.0);
        assert_eq!(interp.interpolate_flat(9.0), 7.0);
        assert!(interp.interpolate(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_value_bounded_by_segment(x in 0.0f64..3.0) {
            let interp = LinearInterpolator::new(&[0.0, 1.0, 3.0], &[2.0, -1.0, 5.0]).unwrap();
            let y = interp.interpolate(x).unwrap();
            prop_assert!((-1.0..=5.0).contains(&y));
        }
    }
}
