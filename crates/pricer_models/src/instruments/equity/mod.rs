//! Equity options.
//!
//! - [`SingleAssetOption`]: European payoff with optional cash dividends and
//!   shout right, priced on a finite-difference grid
//! - [`DividendSchedule`]: validated ex-times and amounts
//! - [`OptionArguments`]/[`OptionResults`]: engine exchange records

mod dividend;
mod option;
mod params;

pub use dividend::{Dividend, DividendSchedule, ValuationDateDividend};
pub use option::{
    FdSettings, OptionArguments, OptionResults, SingleAssetOption, StepConditionKind,
};
pub use params::OptionParams;
