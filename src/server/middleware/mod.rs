//! HTTP middleware implementations
//!
//! This module provides the middleware pair the governance subsystem hangs
//! off every route:
//! - Admission control (reject over-limit callers before any work is done)
//! - Telemetry (time every request and report its completion exactly once)

mod admission;
mod telemetry;


// Re-export all middleware
pub use admission::{AdmissionMiddleware, AdmissionMiddlewareService};
pub use telemetry::{TelemetryMiddleware, TelemetryMiddlewareService};
