//! Time discretisation hitting every mandatory time.

use super::error::FdError;

/// Increasing times from `0` to the residual time.
///
/// Steps are spread over the segments between mandatory times in
/// proportion to their length, with at least one step per segment, so the
/// total can exceed the requested count slightly.
///
/// # Examples
/// ```
/// use pricer_pricing::fd::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 10, &[0.35]).unwrap();
/// assert!(grid.times().contains(&0.35));
/// assert_eq!(grid.times()[0], 0.0);
/// assert_eq!(*grid.times().last().unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// Builds the grid; mandatory times outside `(0, end)` are ignored.
    ///
    /// `0` and `end` are always nodes. A mandatory time inside `(0, end)`
    /// but within `1e-12 × end` of either is an error.
    pub fn new(end: f64, steps: usize, mandatory: &[f64]) -> Result<Self, FdError> {
        if !(end.is_finite() && end > 0.0) {
            return Err(FdError::InvalidSetup(format!(
                "time grid end must be positive, got {}",
                end
            )));
        }
        if steps == 0 {
            return Err(FdError::InvalidSetup("time grid needs at least one step".to_string()));
        }

        let tolerance = 1.0e-12 * end;
        let mut inner: Vec<f64> = mandatory
            .iter()
            .copied()
            .filter(|t| *t > 0.0 && *t < end)
            .collect();
        if let Some(t) = inner
            .iter()
            .find(|t| **t <= tolerance || end - **t <= tolerance)
        {
            return Err(FdError::InvalidSetup(format!(
                "mandatory time {} too close to the grid ends 0 and {}",
                t, end
            )));
        }
        inner.sort_by(f64::total_cmp);
        inner.dedup_by(|a, b| (*a - *b).abs() <= tolerance);

        let mut nodes = Vec::with_capacity(inner.len() + 2);
        nodes.push(0.0);
        nodes.extend(inner);
        nodes.push(end);

        let mut times = Vec::with_capacity(steps + nodes.len());
        times.push(0.0);
        for w in nodes.windows(2) {
            let length = w[1] - w[0];
            let n = ((length / end) * steps as f64).round().max(1.0) as usize;
            times.extend((1..n).map(|k| w[0] + length * k as f64 / n as f64));
            times.push(w[1]);
        }
        Ok(Self { times })
    }

    /// All times, increasing.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Last time.
    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}
