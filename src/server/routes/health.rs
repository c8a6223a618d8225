//! Health check endpoint
//!
//! The health endpoint always answers 200; trouble is signalled only
//! through the embedded `status` field. Load balancers and monitors poll
//! it, so a stalled dependency must never stall the response; the
//! database probe inside the aggregator is timeout-bounded.

use actix_web::{web, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::server::state::AppState;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let report = state.health.evaluate().await;

    Ok(HttpResponse::Ok().json(report))
}
