//! Interest rate instruments.
//!
//! - [`Swap`]: generic multi-leg floating swap with per-leg NPV and BPS
//! - [`BasisSwap`]: short-tenor vs long-tenor Ibor swap with fair spreads
//!
//! Both speak to engines through [`SwapArguments`]/[`SwapResults`]; the
//! basis swap additionally fills [`BasisSwapArguments`] for engines that
//! understand it and falls back to [`implied_fair_spread`] otherwise.

mod basis_swap;
mod swap;

pub use basis_swap::{
    implied_fair_spread, BasisSwap, BasisSwapArguments, BasisSwapResults, BasisSwapType,
    FloatingLegTerms, LegArguments,
};
pub use swap::{Swap, SwapArguments, SwapResults};
