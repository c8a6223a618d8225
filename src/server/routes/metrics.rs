//! Metrics endpoints
//!
//! JSON snapshot for operators plus a Prometheus text exposition. The
//! Prometheus metric names (including `nodejs_memory_usage_bytes`) are part
//! of the scraping contract inherited from the previous deployment and must
//! not be renamed.

use actix_web::{web, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::monitoring::resource_snapshot;
use crate::server::state::AppState;

/// Configure metrics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics_json))
        .route("/metrics/prometheus", web::get().to(metrics_prometheus));
}

/// Metrics snapshot endpoint (operational, not user-facing)
async fn metrics_json(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Metrics snapshot requested");

    Ok(HttpResponse::Ok().json(state.recorder.snapshot()))
}

/// Metrics endpoint (Prometheus format)
async fn metrics_prometheus(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Prometheus metrics requested");

    let snapshot = state.recorder.snapshot();
    let resources = resource_snapshot();

    let body = format!(
        r#"# HELP http_requests_total Total number of HTTP requests
# TYPE http_requests_total counter
http_requests_total {}

# HELP http_request_errors_total Total number of HTTP requests with status >= 400
# TYPE http_request_errors_total counter
http_request_errors_total {}

# HELP http_request_duration_ms Average request duration in milliseconds
# TYPE http_request_duration_ms gauge
http_request_duration_ms {}

# HELP process_uptime_seconds Process uptime in seconds
# TYPE process_uptime_seconds counter
process_uptime_seconds {}

# HELP nodejs_memory_usage_bytes Memory usage in bytes
# TYPE nodejs_memory_usage_bytes gauge
nodejs_memory_usage_bytes{{type="used"}} {}
nodejs_memory_usage_bytes{{type="total"}} {}
"#,
        snapshot.requests.total,
        snapshot.requests.errors,
        snapshot.response_times.avg_ms,
        snapshot.uptime_ms / 1_000,
        resources.memory_used_bytes,
        resources.memory_total_bytes,
    );

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(body))
}
