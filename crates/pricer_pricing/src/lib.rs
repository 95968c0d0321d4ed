//! # Pricer Pricing (L3: Engines)
//!
//! Numerical procedures behind the instruments of `pricer_models`.
//!
//! This crate provides:
//! - [`engines::DiscountingSwapEngine`] for generic multi-leg swaps
//! - [`engines::DiscountingBasisSwapEngine`] for basis swaps, reporting fair
//!   spreads directly
//! - [`engines::FdDividendOptionEngine`] for single-asset options with cash
//!   dividends and a shout right
//! - The [`fd`] building blocks: grids, theta schemes, step conditions and
//!   the rollback loop
//!
//! Engines are attached to instruments through
//! [`pricer_core::traits::engine::share`]; an engine that does not recognise
//! an instrument's arguments leaves the instrument-specific outputs empty.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::curves::FlatCurve;
//! use pricer_core::traits::engine::share;
//! use pricer_core::traits::Instrument;
//! use pricer_core::types::{Date, DayCountConvention, EvaluationDate};
//! use pricer_models::indexes::{CurveHandle, IborIndex};
//! use pricer_models::instruments::rates::{BasisSwap, BasisSwapType, FloatingLegTerms};
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_pricing::engines::DiscountingBasisSwapEngine;
//!
//! let today = Arc::new(EvaluationDate::new(Date::from_ymd(2024, 1, 10).unwrap()));
//! let curve: CurveHandle = Arc::new(FlatCurve::new(0.03));
//! let terms = |tenor: Frequency, spread: f64| {
//!     let index = Arc::new(IborIndex::new(
//!         format!("Euribor{}", tenor.tenor_label()),
//!         tenor,
//!         2,
//!         DayCountConvention::ActualActual360,
//!         Arc::clone(&curve),
//!         Arc::clone(&today),
//!     ));
//!     let schedule = ScheduleBuilder::new()
//!         .start(Date::from_ymd(2024, 1, 15).unwrap())
//!         .end(Date::from_ymd(2029, 1, 15).unwrap())
//!         .frequency(tenor)
//!         .build()
//!         .unwrap();
//!     FloatingLegTerms::new(schedule, index, DayCountConvention::ActualActual360, spread)
//! };
//!
//! let mut swap = BasisSwap::new(
//!     BasisSwapType::Payer,
//!     1_000_000.0,
//!     terms(Frequency::Quarterly, 0.0010),
//!     terms(Frequency::SemiAnnual, 0.0),
//!     None,
//! )
//! .unwrap();
//! swap.set_pricing_engine(share(DiscountingBasisSwapEngine::new(
//!     Arc::clone(&curve),
//!     Arc::clone(&today),
//! )));
//!
//! assert!(swap.npv().unwrap() < 0.0);
//! assert!(swap.short_tenor_leg_fair_spread().unwrap() < 0.0010);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engines;
pub mod fd;
