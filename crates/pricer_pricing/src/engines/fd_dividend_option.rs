//! Finite-difference engine for European, dividend and shout options.

use pricer_core::traits::engine::{
    EngineArguments, EngineResults, GenericEngine, PricingEngine,
};
use pricer_core::types::PricingError;
use pricer_models::instruments::equity::{
    Dividend, OptionArguments, OptionParams, OptionResults, StepConditionKind,
    ValuationDateDividend,
};
use tracing::{debug, warn};

use crate::fd::{
    rollback, BlackScholesOperator, DividendCondition, FdGrid, FdScheme, NullCondition,
    ShoutCondition, StepCondition, ThetaStepper, TimeGrid,
};

/// Prices a [`SingleAssetOption`](pricer_models::instruments::equity::SingleAssetOption)
/// by backward induction on a log-uniform price grid.
///
/// The option's step conditions are turned into grid conditions and applied
/// after every step, dividend jumps before the shout lock-in. NPV, delta and
/// gamma are read at the spot node; delta and gamma are also published as
/// additional results.
///
/// # Examples
///
/// ```
/// use pricer_core::traits::engine::share;
/// use pricer_core::traits::Instrument;
/// use pricer_models::instruments::equity::{FdSettings, OptionParams, SingleAssetOption};
/// use pricer_models::instruments::PayoffType;
/// use pricer_pricing::engines::FdDividendOptionEngine;
/// use pricer_pricing::fd::FdScheme;
///
/// let params = OptionParams::new(PayoffType::Call, 100.0, 100.0, 0.0, 0.05, 1.0, 0.2);
/// let mut option = SingleAssetOption::european(params, FdSettings::new(200, 201)).unwrap();
/// option.set_pricing_engine(share(FdDividendOptionEngine::new(FdScheme::CrankNicolson)));
///
/// let npv = option.npv().unwrap();
/// assert!((npv - 10.4506).abs() < 0.02);
/// ```
#[derive(Debug, Default)]
pub struct FdDividendOptionEngine {
    scheme: FdScheme,
    core: GenericEngine<OptionArguments, OptionResults>,
}

impl FdDividendOptionEngine {
    /// Creates an engine stepping with `scheme`.
    pub fn new(scheme: FdScheme) -> Self {
        Self {
            scheme,
            core: GenericEngine::default(),
        }
    }

    /// Time-stepping scheme.
    pub fn scheme(&self) -> FdScheme {
        self.scheme
    }
}

/// Dividends the rollback has to apply.
fn effective_dividends(args: &OptionArguments) -> Vec<Dividend> {
    if !args.conditions.contains(&StepConditionKind::Dividend) {
        if !args.dividends.is_empty() {
            debug!(
                count = args.dividends.len(),
                "dividends ignored without a dividend condition"
            );
        }
        return Vec::new();
    }
    match args.settings.valuation_date_dividend {
        ValuationDateDividend::Exclude => args
            .dividends
            .iter()
            .filter(|d| {
                let keep = d.time > 0.0;
                if !keep {
                    warn!(amount = d.amount, "dividend going ex on the valuation date dropped");
                }
                keep
            })
            .copied()
            .collect(),
        ValuationDateDividend::Reject | ValuationDateDividend::ApplyAtValuation => {
            args.dividends.as_slice().to_vec()
        }
    }
}

fn build_conditions(
    kinds: &[StepConditionKind],
    dividends: &[Dividend],
    intrinsic: &[f64],
    params: &OptionParams,
) -> Vec<Box<dyn StepCondition>> {
    kinds
        .iter()
        .map(|kind| -> Box<dyn StepCondition> {
            match kind {
                StepConditionKind::None => Box::new(NullCondition),
                StepConditionKind::Dividend => Box::new(DividendCondition::new(dividends)),
                StepConditionKind::Shout => Box::new(ShoutCondition::new(
                    intrinsic.to_vec(),
                    params.residual_time,
                    params.risk_free_rate,
                )),
            }
        })
        .collect()
}

impl PricingEngine for FdDividendOptionEngine {
    fn name(&self) -> &'static str {
        "FdDividendOptionEngine"
    }

    fn arguments(&self) -> &dyn EngineArguments {
        &self.core.arguments
    }

    fn arguments_mut(&mut self) -> &mut dyn EngineArguments {
        &mut self.core.arguments
    }

    fn results(&self) -> &dyn EngineResults {
        &self.core.results
    }

    fn reset(&mut self) {
        self.core.results.reset();
    }

    fn calculate(&mut self) -> Result<(), PricingError> {
        let args = &self.core.arguments;
        let params = args
            .params
            .ok_or_else(|| PricingError::InvalidInput("option parameters not set".to_string()))?;

        let dividends = effective_dividends(args);
        let total_dividends: f64 = dividends.iter().map(|d| d.amount).sum();
        let anchors = [params.strike, params.underlying - total_dividends];

        let mut grid = FdGrid::log_uniform(
            params.underlying,
            &anchors,
            params.volatility,
            params.residual_time,
            args.settings.effective_grid_points(),
        )?;
        grid.fill_with(|s| params.intrinsic(s));

        let ex_times: Vec<f64> = dividends.iter().map(|d| d.time).collect();
        let time_grid = TimeGrid::new(params.residual_time, args.settings.time_steps, &ex_times)?;

        let prices = grid.prices();
        let lower_slope = params.option_type.slope(prices[0], params.strike);
        let upper_slope = params.option_type.slope(prices[prices.len() - 1], params.strike);
        let operator = BlackScholesOperator::new(
            prices,
            params.risk_free_rate,
            params.dividend_yield,
            params.volatility,
        );
        let mut stepper =
            ThetaStepper::new(operator, prices, self.scheme, lower_slope, upper_slope)?;
        let mut conditions =
            build_conditions(&args.conditions, &dividends, grid.values(), &params);

        debug!(
            scheme = %self.scheme,
            nodes = grid.len(),
            steps = time_grid.steps(),
            dividends = dividends.len(),
            conditions = ?args.conditions,
            "rolling back option grid"
        );
        rollback(&mut grid, &time_grid, &mut stepper, &mut conditions, |_, _| {})?;

        let npv = grid.spot_value();
        let (delta, gamma) = grid.delta_gamma();

        let results = &mut self.core.results;
        results.base.value = Some(npv);
        results
            .base
            .additional_results
            .insert("delta".to_string(), delta);
        results
            .base
            .additional_results
            .insert("gamma".to_string(), gamma);
        results.delta = Some(delta);
        results.gamma = Some(gamma);
        Ok(())
    }
}
