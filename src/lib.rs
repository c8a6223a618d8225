//! # Autolot Gateway
//!
//! Traffic governance and observability for the Autolot car marketplace:
//! a per-route admission gate built on sliding time windows, paired with an
//! in-process telemetry engine that aggregates latency and error statistics
//! and raises threshold-based health alerts.
//!
//! The marketplace's request handlers (listings, auth, uploads, messaging,
//! moderation) are external collaborators: they mount the middleware this
//! crate provides, call the gate before doing persistent work, and translate
//! a denial into a retry-after response.
//!
//! ## Gateway mode
//!
//! ```rust,no_run
//! use autolot_gateway::{server, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let server = server::ServerBuilder::new().with_config(config).build()?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedded gate
//!
//! ```rust
//! use autolot_gateway::config::RateLimitConfig;
//! use autolot_gateway::limiter::LimiterRegistry;
//!
//! let registry = LimiterRegistry::new(&RateLimitConfig::default());
//! let decision = registry.evaluate("198.51.100.7", "/cars", "POST");
//! assert!(decision.allowed);
//! ```
//!
//! Rate-limit state is process-local: horizontally scaled deployments get
//! independent, non-coordinated limits per instance.

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod limiter;
pub mod monitoring;
pub mod sdk;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use limiter::{
    AdmissionDecision, Clock, EndpointCategory, LimiterConfig, LimiterRegistry, ManualClock,
    SlidingWindowLimiter, SystemClock,
};
pub use monitoring::{
    Alert, AlertEngine, AlertSeverity, HealthAggregator, MetricsRecorder,
};
pub use sdk::PreflightGate;
pub use utils::error::{GatewayError, Result};
