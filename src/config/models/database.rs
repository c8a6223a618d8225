//! Database probe configuration
//!
//! The gateway does not own a database; it only probes the marketplace's
//! database endpoint for liveness as part of health reporting.

use super::*;
use serde::{Deserialize, Serialize};

/// Database liveness probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Address probed for liveness, host:port
    #[serde(default = "default_database_addr")]
    pub addr: String,
    /// Probe timeout in milliseconds. A stalled database must not stall
    /// health reporting, so the probe is always bounded.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            addr: default_database_addr(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

fn default_database_addr() -> String {
    "127.0.0.1:5432".to_string()
}
