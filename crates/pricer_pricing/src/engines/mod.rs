//! Pricing engines.
//!
//! - [`DiscountingSwapEngine`]: any multi-leg swap.
//! - [`DiscountingBasisSwapEngine`]: basis swaps, with fair spreads.
//! - [`FdDividendOptionEngine`]: single-asset options with dividend and
//!   shout conditions.

mod discounting_basis_swap;
mod discounting_swap;
mod fd_dividend_option;

pub use discounting_basis_swap::DiscountingBasisSwapEngine;
pub use discounting_swap::DiscountingSwapEngine;
pub use fd_dividend_option::FdDividendOptionEngine;
