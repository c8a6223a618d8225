//! Sliding-window admission control
//!
//! This module provides the per-identifier rate limiting primitive and the
//! category registry that routes requests to the correct limiter. One
//! implementation serves both the authoritative server gate and the advisory
//! client-side pre-flight estimate.

mod clock;
mod registry;
mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use registry::{AdmissionDecision, EndpointCategory, LimiterRegistry};
pub use window::{LimiterConfig, SlidingWindowLimiter};
