//! Basis-swap command implementation
//!
//! Builds a floating/floating swap from the configuration and prices it
//! with the discounting basis-swap engine.

use std::sync::Arc;

use pricer_core::market_data::curves::FlatCurve;
use pricer_core::traits::engine::share;
use pricer_core::traits::Instrument;
use pricer_core::types::{EvaluationDate, BASIS_POINT};
use pricer_models::indexes::{CurveHandle, IborIndex};
use pricer_models::instruments::rates::{BasisSwap, FloatingLegTerms};
use pricer_models::schedules::ScheduleBuilder;
use pricer_pricing::engines::DiscountingBasisSwapEngine;
use tracing::info;

use crate::config::{BasisSwapConfig, LegConfig, LegSide};
use crate::{CliError, Result};

/// Valuation summary printed by the command.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisSwapReport {
    pub npv: f64,
    pub short_tenor_leg_npv: f64,
    pub long_tenor_leg_npv: f64,
    pub short_tenor_leg_bps: f64,
    pub long_tenor_leg_bps: f64,
    pub short_tenor_leg_fair_spread: Option<f64>,
    pub long_tenor_leg_fair_spread: Option<f64>,
}

fn leg_terms(
    config: &BasisSwapConfig,
    leg: &LegConfig,
    evaluation_date: &Arc<EvaluationDate>,
) -> Result<FloatingLegTerms> {
    let curve: CurveHandle = Arc::new(FlatCurve::new(leg.forecast_rate));
    let index = Arc::new(IborIndex::new(
        format!("Ibor{}", leg.tenor.tenor_label()),
        leg.tenor,
        leg.fixing_days,
        leg.day_count,
        curve,
        Arc::clone(evaluation_date),
    ));
    let schedule = ScheduleBuilder::new()
        .start(config.start_date)
        .end(config.maturity_date)
        .frequency(leg.tenor)
        .build()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    Ok(FloatingLegTerms::new(schedule, index, leg.day_count, leg.spread))
}

/// Builds and values the configured swap.
pub fn price(config: &BasisSwapConfig) -> Result<BasisSwapReport> {
    let evaluation_date = Arc::new(EvaluationDate::new(config.evaluation_date));
    let discount_curve: CurveHandle = Arc::new(FlatCurve::new(config.discount_rate));

    let mut swap = BasisSwap::new(
        config.swap_type,
        config.nominal,
        leg_terms(config, &config.short_tenor, &evaluation_date)?,
        leg_terms(config, &config.long_tenor, &evaluation_date)?,
        config.payment_convention,
    )?;
    for fixing in &config.fixings {
        let index = match fixing.leg {
            LegSide::Short => swap.short_tenor_index(),
            LegSide::Long => swap.long_tenor_index(),
        };
        index.add_fixing(fixing.date, fixing.rate);
    }

    let engine = DiscountingBasisSwapEngine::new(discount_curve, Arc::clone(&evaluation_date))
        .with_settlement_date_flows(config.include_settlement_date_flows);
    swap.set_pricing_engine(share(engine));

    Ok(BasisSwapReport {
        npv: swap.npv()?,
        short_tenor_leg_npv: swap.short_tenor_leg_npv()?,
        long_tenor_leg_npv: swap.long_tenor_leg_npv()?,
        short_tenor_leg_bps: swap.short_tenor_leg_bps()?,
        long_tenor_leg_bps: swap.long_tenor_leg_bps()?,
        short_tenor_leg_fair_spread: swap.short_tenor_leg_fair_spread().ok(),
        long_tenor_leg_fair_spread: swap.long_tenor_leg_fair_spread().ok(),
    })
}

fn spread_cell(spread: Option<f64>) -> String {
    match spread {
        Some(s) => format!("{:.4} bp", s / BASIS_POINT),
        None => "n/a".to_string(),
    }
}

/// Run the basis-swap command
pub fn run(config: &BasisSwapConfig) -> Result<()> {
    info!("Pricing basis swap...");
    info!("  Type: {}", config.swap_type);
    info!("  Nominal: {}", config.nominal);
    info!(
        "  Legs: {} vs {}",
        config.short_tenor.tenor.tenor_label(),
        config.long_tenor.tenor.tenor_label()
    );
    info!("  Evaluation date: {}", config.evaluation_date);

    let report = price(config)?;

    println!();
    println!("{:<28}{:>20}{:>20}", "", "short tenor", "long tenor");
    println!(
        "{:<28}{:>20.2}{:>20.2}",
        "leg NPV", report.short_tenor_leg_npv, report.long_tenor_leg_npv
    );
    println!(
        "{:<28}{:>20.4}{:>20.4}",
        "leg BPS", report.short_tenor_leg_bps, report.long_tenor_leg_bps
    );
    println!(
        "{:<28}{:>20}{:>20}",
        "fair spread",
        spread_cell(report.short_tenor_leg_fair_spread),
        spread_cell(report.long_tenor_leg_fair_spread)
    );
    println!("{:<28}{:>20.2}", "NPV", report.npv);

    info!("Pricing complete");
    Ok(())
}
