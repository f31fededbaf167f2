//! Health check endpoints

use serde::Serialize;
use utoipa::ToSchema;

use super::Envelope;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = Envelope<HealthResponse>)
    )
)]
pub async fn health_check() -> Envelope<HealthResponse> {
    Envelope::ok(
        "service is healthy",
        HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = Envelope<HealthResponse>)
    )
)]
pub async fn readiness_check() -> Envelope<HealthResponse> {
    Envelope::ok(
        "service is ready",
        HealthResponse {
            status: "ready".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}
