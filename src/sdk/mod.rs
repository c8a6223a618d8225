//! Client-facing SDK helpers

mod preflight;

pub use preflight::PreflightGate;
