//! Why a request failed authentication.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ApiResponse;

/// Every variant is a 401. Clients tell them apart by message only; no
/// `error_code` is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No authorization header provided")]
    MissingHeader,
    #[error("Invalid authorization header format")]
    MalformedHeader,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Authentication failed: {0}")]
    VerificationFailure(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiResponse::error(self.to_string(), StatusCode::UNAUTHORIZED, None).into_response()
    }
}
