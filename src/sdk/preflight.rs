//! Client-side pre-flight rate estimation
//!
//! API clients can mirror the server's admission accounting to avoid
//! sending requests that will certainly be rejected. The gate reuses the
//! exact server-side limiter, so the two sides agree on window accounting,
//! block transitions, and retry arithmetic.
//!
//! The estimate is advisory only. The server's decision is always
//! authoritative; a local "allow" must never be used to skip the server
//! check.

use std::sync::Arc;
use std::time::Duration;

use crate::config::RateLimitConfig;
use crate::limiter::{AdmissionDecision, Clock, EndpointCategory, LimiterRegistry};

/// Advisory client-side admission estimate
#[derive(Debug)]
pub struct PreflightGate {
    registry: LimiterRegistry,
}

impl PreflightGate {
    /// Build a gate from the same configuration shape the server uses
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            registry: LimiterRegistry::new(config),
        }
    }

    /// Build a gate on an injected clock
    pub fn with_clock(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: LimiterRegistry::with_clock(config, clock),
        }
    }

    /// Estimate whether a request would be admitted right now, recording it
    /// locally when it would
    pub fn check(&self, identifier: &str, path: &str, method: &str) -> AdmissionDecision {
        self.registry.evaluate(identifier, path, method)
    }

    /// Locally estimated remaining requests for a category
    pub fn remaining(&self, identifier: &str, path: &str, method: &str) -> u32 {
        let category = EndpointCategory::of(method, path);
        self.registry.limiter(category).remaining_requests(identifier)
    }

    /// Time until the local window frees a slot for a category
    pub fn time_until_reset(&self, identifier: &str, path: &str, method: &str) -> Duration {
        let category = EndpointCategory::of(method, path);
        self.registry.limiter(category).time_until_reset(identifier)
    }

    /// Forget local accounting for one identifier
    pub fn reset(&self, identifier: &str) {
        self.registry.reset(identifier);
    }
}
