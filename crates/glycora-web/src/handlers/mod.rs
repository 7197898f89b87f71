//! HTTP handlers for all web routes.

pub mod home;
pub mod predict;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
