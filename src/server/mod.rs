//! HTTP server implementation
//!
//! This module provides the HTTP server, middleware, and routing
//! functionality.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::{run_server, ServerBuilder};
pub use server::HttpServer;
pub use state::AppState;
