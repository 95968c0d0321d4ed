//! Instrument definitions.
//!
//! Every instrument implements [`pricer_core::traits::Instrument`]: it owns a
//! valuation cache, fills an engine's argument slot and reads the engine's
//! results back. Engines live in `pricer_pricing`.
//!
//! # Asset Class Modules
//!
//! - [`rates`]: generic multi-leg [`Swap`](rates::Swap) and the
//!   floating/floating [`BasisSwap`](rates::BasisSwap)
//! - [`equity`]: [`SingleAssetOption`](equity::SingleAssetOption) with
//!   discrete dividends and shout rights

mod error;
mod payoff;

pub mod equity;
pub mod rates;

pub use error::InstrumentError;
pub use payoff::PayoffType;
