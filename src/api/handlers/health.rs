/*
 * Responsibility
 * - GET / and GET /health (liveness; no auth)
 */
use crate::api::dto::health::HealthResponse;
use crate::api::response::ApiResponse;

pub const SERVICE_NAME: &str = "Rust axum backend with Firebase auth";

pub async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(
        HealthResponse {
            status: "healthy",
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        },
        "Service is running",
    )
}
