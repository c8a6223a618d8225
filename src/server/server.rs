//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use actix_web::{middleware::DefaultHeaders, web, App, HttpServer as ActixHttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::server::middleware::{AdmissionMiddleware, TelemetryMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Background task interval configuration
    resource_poll: Duration,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        config.validate()?;

        let state = AppState::new(config.clone());

        Ok(Self {
            config: config.server.clone(),
            resource_poll: Duration::from_secs(config.monitoring.resource_poll_secs),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        // Admission is registered last so it runs first: denied requests
        // are never timed or recorded.
        App::new()
            .app_data(state)
            .wrap(DefaultHeaders::new().add(("Server", "autolot-gateway")))
            .wrap(TelemetryMiddleware)
            .wrap(AdmissionMiddleware)
            .configure(routes::health::configure_routes)
            .configure(routes::metrics::configure_routes)
            .configure(routes::alerts::configure_routes)
    }

    /// Start the HTTP server and the background monitoring tasks
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting HTTP server on {}", bind_addr);

        crate::monitoring::start_resource_poll(self.state.alerts.clone(), self.resource_poll);
        crate::monitoring::start_limiter_cleanup(
            Arc::clone(&self.state.limiters),
            self.resource_poll,
        );

        let workers = self.config.workers;
        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| {
                GatewayError::Config(format!("failed to bind {}: {}", bind_addr, e))
            })?;

        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        info!("HTTP server listening on {}", bind_addr);
        server.run().await.map_err(GatewayError::Io)
    }
}
