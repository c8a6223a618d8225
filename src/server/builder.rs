//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for programmatic configuration
//! and the run_server function for automatic configuration loading.

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};

/// Default configuration file, overridable via GATEWAY_CONFIG
const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Server builder for programmatic configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting Autolot traffic gateway");

    let config_path =
        std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Loading configuration file: {}", config_path);

    let config = match Config::from_file(&config_path).await {
        Ok(config) => config,
        Err(e) => {
            info!("Configuration file unavailable, using defaults: {}", e);
            Config::default()
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("Operational endpoints:");
    info!("   GET  /health - Health rollup");
    info!("   GET  /metrics - Telemetry snapshot");
    info!("   GET  /metrics/prometheus - Prometheus exposition");
    info!("   GET  /alerts - Alert list");
    info!("   POST /alerts/{{id}}/resolve - Resolve an alert");

    server.start().await
}
