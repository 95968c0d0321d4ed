//! Floating-rate cash flows.
//!
//! - [`FloatingRateCoupon`]: one Ibor coupon with spread and gearing
//! - [`IborLeg`]: builder turning a schedule and an index into a [`Leg`]

mod coupon;
mod leg;

pub use coupon::FloatingRateCoupon;
pub use leg::IborLeg;

/// Ordered coupons on one side of a swap.
pub type Leg = Vec<FloatingRateCoupon>;
