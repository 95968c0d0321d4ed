//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod basis_swap;
pub mod shout_option;
