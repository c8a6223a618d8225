//! Category registry for the admission gate
//!
//! Routes an inbound request to the correct limiter by inspecting its path
//! and method through a fixed, ordered prefix table (first match wins).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::clock::Clock;
use super::window::{LimiterConfig, SlidingWindowLimiter};
use crate::config::{LimiterSettings, RateLimitConfig};

/// Endpoint categories with independently configured limiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointCategory {
    Auth,
    Upload,
    Messaging,
    ListingCreation,
    Admin,
    Default,
}

impl EndpointCategory {
    /// Categorize a request. Ordered prefix table, first match wins:
    /// `/auth*`, `/upload*`, `/messages*`/`/conversations*`, `POST /cars*`,
    /// `/admin*`, then the default fallback.
    pub fn of(method: &str, path: &str) -> Self {
        if path.starts_with("/auth") {
            EndpointCategory::Auth
        } else if path.starts_with("/upload") {
            EndpointCategory::Upload
        } else if path.starts_with("/messages") || path.starts_with("/conversations") {
            EndpointCategory::Messaging
        } else if method.eq_ignore_ascii_case("POST") && path.starts_with("/cars") {
            EndpointCategory::ListingCreation
        } else if path.starts_with("/admin") {
            EndpointCategory::Admin
        } else {
            EndpointCategory::Default
        }
    }

    /// All categories, used to build the registry
    fn all() -> [EndpointCategory; 6] {
        [
            EndpointCategory::Auth,
            EndpointCategory::Upload,
            EndpointCategory::Messaging,
            EndpointCategory::ListingCreation,
            EndpointCategory::Admin,
            EndpointCategory::Default,
        ]
    }
}

impl std::fmt::Display for EndpointCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EndpointCategory::Auth => "auth",
            EndpointCategory::Upload => "upload",
            EndpointCategory::Messaging => "messaging",
            EndpointCategory::ListingCreation => "listing-creation",
            EndpointCategory::Admin => "admin",
            EndpointCategory::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// Result of an admission check
#[derive(Debug, Clone)]
pub struct AdmissionDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Category that made the decision
    pub category: EndpointCategory,
    /// How long the caller should wait before retrying (zero when allowed)
    pub retry_after: Duration,
}

impl AdmissionDecision {
    /// Retry-after in whole seconds, for the wire contract
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after.as_secs()
    }
}

/// Owns one configured limiter per endpoint category
///
/// The registry is the sole owner of all per-identifier window state; no
/// other component mutates it.
#[derive(Debug)]
pub struct LimiterRegistry {
    limiters: HashMap<EndpointCategory, SlidingWindowLimiter>,
}

impl LimiterRegistry {
    /// Build a registry on the system clock
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::build(config, None)
    }

    /// Build a registry on an injected clock
    pub fn with_clock(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self::build(config, Some(clock))
    }

    fn build(config: &RateLimitConfig, clock: Option<Arc<dyn Clock>>) -> Self {
        let mut limiters = HashMap::new();
        for category in EndpointCategory::all() {
            let settings = Self::settings_for(config, category);
            let limiter_config = limiter_config_from(settings);
            let limiter = match &clock {
                Some(clock) => SlidingWindowLimiter::with_clock(limiter_config, clock.clone()),
                None => SlidingWindowLimiter::new(limiter_config),
            };
            limiters.insert(category, limiter);
        }
        Self { limiters }
    }

    fn settings_for(config: &RateLimitConfig, category: EndpointCategory) -> &LimiterSettings {
        match category {
            EndpointCategory::Auth => &config.auth,
            EndpointCategory::Upload => &config.upload,
            EndpointCategory::Messaging => &config.messaging,
            EndpointCategory::ListingCreation => &config.listing_creation,
            EndpointCategory::Admin => &config.admin,
            EndpointCategory::Default => &config.default,
        }
    }

    /// Evaluate an inbound request and record it when admitted.
    ///
    /// A denial carries the category's configured retry-after; the HTTP
    /// layer translates it into a 429 with that value.
    pub fn evaluate(&self, identifier: &str, path: &str, method: &str) -> AdmissionDecision {
        let category = EndpointCategory::of(method, path);
        let limiter = &self.limiters[&category];

        match limiter.acquire(identifier) {
            Ok(()) => AdmissionDecision {
                allowed: true,
                category,
                retry_after: Duration::ZERO,
            },
            Err(delay) => AdmissionDecision {
                allowed: false,
                category,
                retry_after: delay,
            },
        }
    }

    /// Limiter for one category
    pub fn limiter(&self, category: EndpointCategory) -> &SlidingWindowLimiter {
        &self.limiters[&category]
    }

    /// Clear one identifier's state across every category
    pub fn reset(&self, identifier: &str) {
        for limiter in self.limiters.values() {
            limiter.reset(identifier);
        }
    }

    /// Clear all state across every category
    pub fn reset_all(&self) {
        for limiter in self.limiters.values() {
            limiter.reset_all();
        }
    }

    /// Evict idle identifiers across every category
    pub fn cleanup_idle(&self) {
        for limiter in self.limiters.values() {
            limiter.cleanup_idle();
        }
    }
}

fn limiter_config_from(settings: &LimiterSettings) -> LimiterConfig {
    let window = Duration::from_millis(settings.window_ms);
    let config = LimiterConfig::new(settings.max_requests, window);
    match settings.retry_after_ms {
        Some(retry_after_ms) => config.with_retry_after(Duration::from_millis(retry_after_ms)),
        None => config,
    }
}
