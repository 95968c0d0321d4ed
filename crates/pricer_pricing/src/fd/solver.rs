//! Backward induction over a time grid.

use super::error::FdError;
use super::grid::FdGrid;
use super::scheme::ThetaStepper;
use super::step_condition::StepCondition;
use super::time_grid::TimeGrid;

/// Rolls `grid` from the last time of `time_grid` back to `0`.
///
/// `grid` must hold the terminal layer. At each earlier layer the scheme
/// steps first, then every condition is applied in slice order, then the
/// layer is checked for non-finite values and handed to `on_layer`. The
/// terminal layer is reported too, before the first step.
pub fn rollback<F>(
    grid: &mut FdGrid,
    time_grid: &TimeGrid,
    stepper: &mut ThetaStepper,
    conditions: &mut [Box<dyn StepCondition>],
    mut on_layer: F,
) -> Result<(), FdError>
where
    F: FnMut(f64, &FdGrid),
{
    let times = time_grid.times();
    grid.check_finite(time_grid.end())?;
    on_layer(time_grid.end(), grid);

    for k in (0..time_grid.steps()).rev() {
        let time = times[k];
        stepper.step(grid.values_mut(), times[k + 1] - time)?;
        for condition in conditions.iter_mut() {
            condition.apply_to(grid, time)?;
        }
        grid.check_finite(time)?;
        on_layer(time, grid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fd::operator::BlackScholesOperator;
    use crate::fd::scheme::FdScheme;
    use crate::fd::step_condition::{NullCondition, ShoutCondition};
    use proptest::prelude::*;

    fn call_grid(spot: f64, strike: f64, vol: f64, t: f64) -> FdGrid {
        let mut grid = FdGrid::log_uniform(spot, &[strike], vol, t, 101).unwrap();
        grid.fill_with(|s| (s - strike).max(0.0));
        grid
    }

    fn layers(
        mut grid: FdGrid,
        rate: f64,
        vol: f64,
        t: f64,
        conditions: &mut [Box<dyn StepCondition>],
    ) -> Vec<(f64, Vec<f64>)> {
        let op = BlackScholesOperator::new(grid.prices(), rate, 0.0, vol);
        let mut stepper =
            ThetaStepper::new(op, grid.prices(), FdScheme::Implicit, 0.0, 1.0).unwrap();
        let time_grid = TimeGrid::new(t, 50, &[]).unwrap();
        let mut out = Vec::new();
        rollback(&mut grid, &time_grid, &mut stepper, conditions, |time, g| {
            out.push((time, g.values().to_vec()))
        })
        .unwrap();
        out
    }

    #[test]
    fn test_reports_every_layer() {
        let grid = call_grid(100.0, 100.0, 0.2, 1.0);
        let mut conditions: Vec<Box<dyn StepCondition>> = vec![Box::new(NullCondition)];
        let out = layers(grid, 0.05, 0.2, 1.0, &mut conditions);
        assert_eq!(out.len(), 51);
        assert_eq!(out[0].0, 1.0);
        assert_eq!(out[50].0, 0.0);
    }

    #[test]
    fn test_non_finite_terminal_layer() {
        let mut grid = call_grid(100.0, 100.0, 0.2, 1.0);
        grid.values_mut()[3] = f64::NAN;
        let op = BlackScholesOperator::new(grid.prices(), 0.05, 0.0, 0.2);
        let mut stepper =
            ThetaStepper::new(op, grid.prices(), FdScheme::Implicit, 0.0, 1.0).unwrap();
        let time_grid = TimeGrid::new(1.0, 10, &[]).unwrap();
        let err = rollback(&mut grid, &time_grid, &mut stepper, &mut [], |_, _| {}).unwrap_err();
        assert_eq!(err, FdError::NonFinite { node: 3, time: 1.0 });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_shout_dominates_european_on_every_layer(
            strike in 80.0f64..120.0,
            rate in 0.0f64..0.1,
            vol in 0.1f64..0.5,
            t in 0.25f64..2.0,
        ) {
            let european = layers(call_grid(100.0, strike, vol, t), rate, vol, t, &mut []);

            let grid = call_grid(100.0, strike, vol, t);
            let intrinsic = grid.values().to_vec();
            let mut conditions: Vec<Box<dyn StepCondition>> =
                vec![Box::new(ShoutCondition::new(intrinsic, t, rate))];
            let shout = layers(grid, rate, vol, t, &mut conditions);

            prop_assert_eq!(european.len(), shout.len());
            for ((_, e), (_, s)) in european.iter().zip(&shout) {
                for (ev, sv) in e.iter().zip(s) {
                    prop_assert!(sv + 1e-10 >= *ev);
                }
            }
        }
    }
}
