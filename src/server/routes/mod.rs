//! HTTP route modules
//!
//! This module contains the operational route handlers: health, metrics,
//! and alert management. Marketplace CRUD routes live in the embedding
//! application and are governed by the same middleware chain.

pub mod alerts;
pub mod health;
pub mod metrics;

use actix_web::HttpResponse;

/// Standard API response structure for management endpoints
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Convert the API response to an HTTP response
    pub fn to_http_response(&self) -> HttpResponse {
        if self.success {
            HttpResponse::Ok().json(self)
        } else {
            HttpResponse::BadRequest().json(self)
        }
    }
}
