//! Numerical building blocks shared by curves and finite-difference engines.

pub mod interpolators;
