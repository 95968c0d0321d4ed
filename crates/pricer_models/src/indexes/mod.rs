//! Interest-rate indices.
//!
//! - [`IborIndex`]: term deposit index with a fixing store and curve forecasting

mod ibor;

pub use ibor::{CurveHandle, IborIndex};
