//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        // Admission denials have a fixed body shape that API clients parse
        // for display: { "error": ..., "retryAfter": ... }.
        if let GatewayError::AdmissionDenied {
            retry_after: wait, ..
        } = self
        {
            return HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", wait.as_secs().to_string()))
                .insert_header((
                    "X-Server-Time",
                    chrono::Utc::now().timestamp_millis().to_string(),
                ))
                .json(RateLimitedBody {
                    error: self.to_string(),
                    retry_after: format_retry_after(*wait),
                });
        }

        let (status_code, error_code, message) = match self {
            GatewayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            GatewayError::Timeout(_) => (
                actix_web::http::StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                self.to_string(),
            ),
            GatewayError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            GatewayError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            GatewayError::Monitoring(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "MONITORING_ERROR",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail payload
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

/// 429 body relied on by API clients for display
#[derive(serde::Serialize)]
struct RateLimitedBody {
    error: String,
    #[serde(rename = "retryAfter")]
    retry_after: String,
}

/// Render a retry-after duration for humans: "30s", "15m", "1h5m"
pub fn format_retry_after(wait: Duration) -> String {
    let secs = wait.as_secs();
    if secs < 60 {
        return format!("{}s", secs.max(1));
    }
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 && hours == 0 {
        out.push_str(&format!("{}s", seconds));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_retry_after_seconds() {
        assert_eq!(format_retry_after(Duration::from_secs(30)), "30s");
        // Sub-second waits still tell the caller to wait
        assert_eq!(format_retry_after(Duration::from_millis(400)), "1s");
    }

    #[test]
    fn test_format_retry_after_minutes() {
        assert_eq!(format_retry_after(Duration::from_secs(900)), "15m");
        assert_eq!(format_retry_after(Duration::from_secs(150)), "2m30s");
    }

    #[test]
    fn test_format_retry_after_hours() {
        assert_eq!(format_retry_after(Duration::from_secs(3900)), "1h5m");
        assert_eq!(format_retry_after(Duration::from_secs(3600)), "1h");
    }

    #[test]
    fn test_admission_denied_response_shape() {
        let err = GatewayError::AdmissionDenied {
            category: "auth".to_string(),
            retry_after: Duration::from_secs(900),
        };
        let response = err.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok()),
            Some("900")
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = GatewayError::NotFound("no such alert".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::NOT_FOUND
        );
    }
}
