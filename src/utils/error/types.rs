//! Error types for the gateway

use std::time::Duration;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Request rejected by the admission gate. Expected under load and
    /// mapped to 429 with a retry-after; never logged as an error.
    #[error("Rate limit exceeded for {category} requests")]
    AdmissionDenied {
        /// Endpoint category that rejected the request
        category: String,
        /// How long the caller should wait before retrying
        retry_after: Duration,
    },

    /// Probe or operation timeout
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Monitoring errors
    #[error("Monitoring error: {0}")]
    Monitoring(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
