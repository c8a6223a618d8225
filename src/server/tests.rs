//! Tests for the operational routes

use actix_web::{test, web, App};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::monitoring::{AlertSeverity, DatabaseProbe, MetricDimension, RequestSample};
use crate::server::routes;
use crate::server::state::AppState;

struct OkProbe;

#[async_trait]
impl DatabaseProbe for OkProbe {
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

struct FailingProbe;

#[async_trait]
impl DatabaseProbe for FailingProbe {
    async fn ping(&self) -> Result<(), String> {
        Err("connection refused".to_string())
    }
}

fn state_with_probe(probe: Arc<dyn DatabaseProbe>) -> web::Data<AppState> {
    web::Data::new(AppState::with_probe(Config::default(), probe))
}

macro_rules! routes_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::health::configure_routes)
                .configure(routes::metrics::configure_routes)
                .configure(routes::alerts::configure_routes),
        )
        .await
    };
}

fn sample(status: u16, duration_ms: i64) -> RequestSample {
    RequestSample {
        method: "GET".to_string(),
        status,
        duration_ms,
        network_latency_ms: Some(40),
        timestamp: chrono::Utc::now(),
    }
}

#[actix_web::test]
async fn test_metrics_snapshot_shape() {
    let state = state_with_probe(Arc::new(OkProbe));
    state.recorder.record(sample(200, 25));
    state.recorder.record(sample(500, 100));
    let app = routes_app!(state);

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["requests"]["total"], 2);
    assert_eq!(body["requests"]["by_method"]["GET"], 2);
    assert_eq!(body["requests"]["by_status"]["500"], 1);
    assert_eq!(body["requests"]["errors"], 1);
    assert_eq!(body["requests"]["error_rate"], 0.5);
    assert!(body["uptime_ms"].is_u64());
    assert!(body["response_times"]["p95_ms"].is_number());
    assert_eq!(body["response_times"]["samples"], 2);
    assert_eq!(body["network_latency"]["samples"], 2);
}

#[actix_web::test]
async fn test_prometheus_exposition_names() {
    let state = state_with_probe(Arc::new(OkProbe));
    state.recorder.record(sample(200, 25));
    let app = routes_app!(state);

    let req = test::TestRequest::get()
        .uri("/metrics/prometheus")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    assert!(res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .starts_with("text/plain"));

    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("http_requests_total 1"));
    assert!(body.contains("http_request_errors_total 0"));
    assert!(body.contains("http_request_duration_ms"));
    assert!(body.contains("process_uptime_seconds"));
    assert!(body.contains("nodejs_memory_usage_bytes{type="));
}

#[actix_web::test]
async fn test_health_is_200_even_when_unhealthy() {
    let state = state_with_probe(Arc::new(FailingProbe));
    let app = routes_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["database"], "unhealthy");
    assert!(body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m.as_str().unwrap().contains("database probe failed")));
}

#[actix_web::test]
async fn test_health_healthy_with_reachable_database() {
    let state = state_with_probe(Arc::new(OkProbe));
    let app = routes_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["checks"]["database"], "healthy");
    assert!(body["checks"]["cpu"].is_string());
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_alert_listing_and_filters() {
    let state = state_with_probe(Arc::new(OkProbe));
    state.alerts.evaluate(MetricDimension::Cpu, 85.0);
    state.alerts.evaluate(MetricDimension::Cpu, 99.0);
    let app = routes_app!(state);

    let req = test::TestRequest::get().uri("/alerts").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/alerts?type=critical")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let criticals = body["data"].as_array().unwrap();
    assert_eq!(criticals.len(), 1);
    assert_eq!(criticals[0]["severity"], "critical");
}

#[actix_web::test]
async fn test_alert_resolution_roundtrip() {
    let state = state_with_probe(Arc::new(OkProbe));
    let alert = state
        .alerts
        .raise(AlertSeverity::Warning, "cpu spike".to_string());
    let app = routes_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/alerts/{}/resolve", alert.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());

    let req = test::TestRequest::get()
        .uri("/alerts?resolved=false")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_alert_resolution_unknown_id_is_404() {
    let state = state_with_probe(Arc::new(OkProbe));
    let app = routes_app!(state);

    let req = test::TestRequest::post()
        .uri("/alerts/not-a-real-id/resolve")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
}
