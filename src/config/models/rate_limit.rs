//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Rate limiting configuration
///
/// Each endpoint category carries its own sliding-window settings. Abuse
/// sensitive categories (auth, listing creation) run tighter windows than
/// default browsing traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable the admission gate
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Login and token endpoints
    #[serde(default = "default_auth_limits")]
    pub auth: LimiterSettings,
    /// Image upload endpoints
    #[serde(default = "default_upload_limits")]
    pub upload: LimiterSettings,
    /// Buyer/seller messaging endpoints
    #[serde(default = "default_messaging_limits")]
    pub messaging: LimiterSettings,
    /// Listing creation (POST /cars)
    #[serde(default = "default_listing_creation_limits")]
    pub listing_creation: LimiterSettings,
    /// Admin moderation endpoints
    #[serde(default = "default_admin_limits")]
    pub admin: LimiterSettings,
    /// Everything else
    #[serde(default = "default_default_limits")]
    pub default: LimiterSettings,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth: default_auth_limits(),
            upload: default_upload_limits(),
            messaging: default_messaging_limits(),
            listing_creation: default_listing_creation_limits(),
            admin: default_admin_limits(),
            default: default_default_limits(),
        }
    }
}

/// Sliding-window settings for one endpoint category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterSettings {
    /// Maximum admitted requests per window
    pub max_requests: u32,
    /// Window size in milliseconds
    pub window_ms: u64,
    /// Cooldown imposed once the limit is hit, in milliseconds.
    /// Defaults to `window_ms` when unset.
    #[serde(default)]
    pub retry_after_ms: Option<u64>,
}

fn default_auth_limits() -> LimiterSettings {
    LimiterSettings {
        max_requests: 5,
        window_ms: 900_000,
        retry_after_ms: None,
    }
}

fn default_upload_limits() -> LimiterSettings {
    LimiterSettings {
        max_requests: 20,
        window_ms: 60_000,
        retry_after_ms: None,
    }
}

fn default_messaging_limits() -> LimiterSettings {
    LimiterSettings {
        max_requests: 60,
        window_ms: 60_000,
        retry_after_ms: None,
    }
}

fn default_listing_creation_limits() -> LimiterSettings {
    LimiterSettings {
        max_requests: 10,
        window_ms: 3_600_000,
        retry_after_ms: None,
    }
}

fn default_admin_limits() -> LimiterSettings {
    LimiterSettings {
        max_requests: 30,
        window_ms: 60_000,
        retry_after_ms: None,
    }
}

fn default_default_limits() -> LimiterSettings {
    LimiterSettings {
        max_requests: 120,
        window_ms: 60_000,
        retry_after_ms: None,
    }
}
