//! Alert management endpoints

use actix_web::{web, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::monitoring::{AlertFilter, AlertSeverity};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;

/// Configure alert management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/alerts", web::get().to(list_alerts))
        .route("/alerts/{id}/resolve", web::post().to(resolve_alert));
}

/// Query parameters for alert listing
#[derive(Debug, serde::Deserialize)]
struct AlertsQuery {
    /// Filter by resolution state
    resolved: Option<bool>,
    /// Filter by severity
    #[serde(rename = "type")]
    severity: Option<AlertSeverity>,
}

/// List retained alerts, newest first
async fn list_alerts(
    state: web::Data<AppState>,
    query: web::Query<AlertsQuery>,
) -> ActixResult<HttpResponse> {
    debug!("Alert list requested");

    let filter = AlertFilter {
        resolved: query.resolved,
        severity: query.severity,
    };

    let alerts = state.alerts.alerts(&filter);
    Ok(HttpResponse::Ok().json(ApiResponse::success(alerts)))
}

/// Resolve an alert by id. Unknown ids (including evicted alerts) yield 404.
async fn resolve_alert(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    if state.alerts.resolve(&id) {
        Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "id": id }))))
    } else {
        Err(GatewayError::NotFound(format!("unknown alert id: {}", id)).into())
    }
}
