//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod database;
pub mod monitoring;
pub mod rate_limit;
pub mod server;

// Re-export all configuration types
pub use database::*;
pub use monitoring::*;
pub use rate_limit::*;
pub use server::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default database probe timeout in milliseconds
pub fn default_probe_timeout_ms() -> u64 {
    2_000
}

/// Default resource poll interval in seconds
pub fn default_resource_poll_secs() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}
