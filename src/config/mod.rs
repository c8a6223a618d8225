//! Configuration management for the gateway
//!
//! This module handles loading and validation of all gateway configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database probe configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Admission gate configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Telemetry and alerting configuration
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get database probe configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Get admission gate configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.rate_limit
    }

    /// Get monitoring configuration
    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.monitoring
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        for (category, settings) in [
            ("auth", &self.rate_limit.auth),
            ("upload", &self.rate_limit.upload),
            ("messaging", &self.rate_limit.messaging),
            ("listing_creation", &self.rate_limit.listing_creation),
            ("admin", &self.rate_limit.admin),
            ("default", &self.rate_limit.default),
        ] {
            if settings.max_requests == 0 {
                return Err(GatewayError::Config(format!(
                    "rate_limit.{}.max_requests must be greater than zero",
                    category
                )));
            }
            if settings.window_ms == 0 {
                return Err(GatewayError::Config(format!(
                    "rate_limit.{}.window_ms must be greater than zero",
                    category
                )));
            }
        }

        if self.database.probe_timeout_ms == 0 {
            return Err(GatewayError::Config(
                "database.probe_timeout_ms must be greater than zero".to_string(),
            ));
        }

        for band in [
            &self.monitoring.thresholds.cpu,
            &self.monitoring.thresholds.memory,
            &self.monitoring.thresholds.disk,
            &self.monitoring.thresholds.response_time_ms,
            &self.monitoring.thresholds.error_rate_percent,
        ] {
            if band.warning >= band.critical {
                return Err(GatewayError::Config(
                    "alert threshold warning band must sit below the critical band".to_string(),
                ));
            }
        }

        Ok(())
    }
}
