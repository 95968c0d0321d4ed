//! # Pricer Models (L2: Business Logic)
//!
//! Contract definitions built on the instrument/engine contract of
//! `pricer_core`.
//!
//! This crate provides:
//! - Payment schedules and frequencies
//! - Ibor indices with a fixing store and curve forecasting
//! - Floating-rate coupons and a leg builder
//! - Instruments: generic swap, basis swap, single-asset dividend/shout option
//!
//! ## Design Principles
//!
//! - **Lazy valuation**: instruments cache results until an observed input changes
//! - **Checked downcasts** between instruments and engines
//! - **Composition over inheritance** for option variants
//! - **Builder pattern** for schedules and legs

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cashflows;
pub mod indexes;
pub mod instruments;
pub mod schedules;
