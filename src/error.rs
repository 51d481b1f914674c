/*
 * Responsibility
 * - Process-wide AppError for failures that are not authentication failures
 * - IntoResponse through the shared envelope (status / message / error_code)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request")]
    BadRequest { detail: String },
    #[error("Endpoint not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Request timeout")]
    Timeout,
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::NotFound => "NOT_FOUND",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::Timeout => "REQUEST_TIMEOUT",
            AppError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::BadRequest { detail } = &self {
            tracing::debug!(%detail, "rejecting malformed request");
        }

        ApiResponse::error(self.to_string(), self.status(), Some(self.code())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let (status, body) = body_of(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], json!("Endpoint not found"));
        assert_eq!(body["error_code"], json!("NOT_FOUND"));
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn internal_maps_to_500_envelope() {
        let (status, body) = body_of(AppError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!("Internal server error"));
        assert_eq!(body["error_code"], json!("INTERNAL_ERROR"));
    }

    #[tokio::test]
    async fn method_not_allowed_maps_to_405_envelope() {
        let (status, body) = body_of(AppError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["message"], json!("Method not allowed"));
        assert_eq!(body["error_code"], json!("METHOD_NOT_ALLOWED"));
    }

    #[tokio::test]
    async fn payload_too_large_maps_to_413_envelope() {
        let (status, body) = body_of(AppError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error_code"], json!("PAYLOAD_TOO_LARGE"));
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn bad_request_hides_detail_from_client() {
        let (status, body) = body_of(AppError::bad_request("expected value at line 1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("Bad request"));
        assert_eq!(body["error_code"], json!("BAD_REQUEST"));
    }
}
