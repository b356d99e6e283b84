//! Estimate travel between stops.
//!
//! Travel time is a closed-form estimate: great-circle distance at a fixed
//! speed for the chosen [`TransportMode`], plus a flat overhead per leg. The
//! [`TravelTimeEstimator`] trait lets tests and callers substitute their own
//! estimates.

mod estimator;
mod mode;

pub use estimator::{LEG_OVERHEAD_MIN, Leg, TravelTimeEstimator, leg_minutes};
pub use mode::TransportMode;
