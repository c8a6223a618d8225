//! Telemetry middleware for request monitoring
//!
//! Times every admitted request end-to-end and hands the completed sample
//! to the recorder, exactly one call per request, made here and nowhere
//! else. Also implements the client-time header contract: requests may
//! carry `X-Client-Time` (epoch ms) for one-way latency estimation and
//! every response carries `X-Server-Time`.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web;
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tracing::info;

use crate::monitoring::{MetricDimension, RequestSample};
use crate::server::state::AppState;

const CLIENT_TIME_HEADER: &str = "x-client-time";
const SERVER_TIME_HEADER: &str = "x-server-time";

/// Telemetry middleware for Actix-web
pub struct TelemetryMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TelemetryMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = TelemetryMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TelemetryMiddlewareService { service }))
    }
}

/// Service implementation for telemetry middleware
pub struct TelemetryMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TelemetryMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let received_at_ms = chrono::Utc::now().timestamp_millis();
        let method = req.method().to_string();
        let path = req.path().to_string();

        // One-way latency estimate: server receive time minus client send
        // time. The recorder discards values outside its sanity bound.
        let network_latency_ms = req
            .headers()
            .get(CLIENT_TIME_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .map(|client_ms| received_at_ms - client_ms);

        let app_state = req.app_data::<web::Data<AppState>>().cloned();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let duration = start.elapsed();
            let status = res.status().as_u16();

            let server_time = chrono::Utc::now().timestamp_millis().to_string();
            if let Ok(value) = HeaderValue::from_str(&server_time) {
                res.headers_mut()
                    .insert(HeaderName::from_static(SERVER_TIME_HEADER), value);
            }

            if let Some(state) = &app_state {
                state.recorder.record(RequestSample {
                    method: method.clone(),
                    status,
                    duration_ms: duration.as_millis() as i64,
                    network_latency_ms,
                    timestamp: chrono::Utc::now(),
                });

                // Edge-triggered evaluation on every recorded sample
                state
                    .alerts
                    .evaluate(MetricDimension::ResponseTime, duration.as_millis() as f64);
                state
                    .alerts
                    .evaluate(MetricDimension::ErrorRate, state.recorder.error_rate() * 100.0);
            }

            info!("{} {} -> {} in {:?}", method, path, status, duration);

            Ok(res)
        })
    }
}
