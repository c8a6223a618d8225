//! Admission control middleware
//!
//! Every inbound request passes the gate before any handler work. Denials
//! are expected behavior under load, not errors: they map to 429 with the
//! category's retry-after and are logged at debug level.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, ResponseError};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

use crate::server::state::AppState;
use crate::utils::error::GatewayError;

/// Admission gate middleware for Actix-web
pub struct AdmissionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdmissionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AdmissionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdmissionMiddlewareService { service }))
    }
}

/// Service implementation for the admission gate
pub struct AdmissionMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AdmissionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        if let Some(state) = app_state {
            if state.config.rate_limit.enabled {
                let identifier = caller_identifier(&req);
                let decision =
                    state
                        .limiters
                        .evaluate(&identifier, req.path(), req.method().as_str());

                if !decision.allowed {
                    debug!(
                        identifier = %identifier,
                        category = %decision.category,
                        retry_after_secs = decision.retry_after_secs(),
                        "request rejected by admission gate"
                    );
                    let denied = GatewayError::AdmissionDenied {
                        category: decision.category.to_string(),
                        retry_after: decision.retry_after,
                    };
                    let response = req.into_response(denied.error_response());
                    return Box::pin(ready(Ok(response.map_into_right_body())));
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

/// Caller identity for rate limiting.
///
/// The gate is identifier-agnostic; the connection peer address is the
/// default. An auth layer sitting in front may substitute a user id or
/// session token through the same registry API.
fn caller_identifier(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
