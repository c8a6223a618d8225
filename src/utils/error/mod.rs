//! Error handling for the gateway
//!
//! This module defines all error types used throughout the gateway.

mod response;
mod types;

pub use response::{format_retry_after, ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
