//! Monitoring and observability system
//!
//! This module provides request telemetry aggregation, threshold alerting,
//! and health reporting functionality.

// Public submodules
pub mod alerts;
pub mod health;
pub mod percentile;
pub mod recorder;

// Internal submodules
mod background;
mod bounded;
mod system;
mod tests;
mod types;

// Re-export public types
pub use alerts::AlertEngine;
pub use background::{start_limiter_cleanup, start_resource_poll};
pub use health::{DatabaseProbe, HealthAggregator, TcpProbe};
pub use recorder::MetricsRecorder;
pub use system::resource_snapshot;
pub use types::{
    Alert, AlertFilter, AlertSeverity, CheckStatus, HealthChecks, HealthReport, LatencySummary,
    MetricDimension, MetricsSnapshot, RequestSample, RequestTotals, ResourceSnapshot,
};
