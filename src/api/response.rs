//! Uniform response envelope.
//!
//! Every response this API produces, success or failure, is serialized as:
//!
//! ```json
//! { "success": true, "message": "...", "timestamp": "...", "data": { ... } }
//! { "success": false, "message": "...", "timestamp": "...", "error_code": "..." }
//! ```
//!
//! `data` only ever appears on success envelopes and `error_code` only on
//! error envelopes. Absent fields are omitted rather than serialized as `null`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Wire shape shared by all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = serde_json::Value> {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// An envelope paired with the HTTP status it is sent with.
///
/// The status is passed through untouched; picking a sensible one is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct ApiResponse<T = serde_json::Value> {
    pub status: StatusCode,
    pub body: ResponseEnvelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope. `data` is included only when `Some`.
    pub fn success(data: Option<T>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            status,
            body: ResponseEnvelope {
                success: true,
                message: message.into(),
                timestamp: Utc::now(),
                data,
                error_code: None,
            },
        }
    }

    /// `200 OK` with a payload.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::success(Some(data), message, StatusCode::OK)
    }
}

impl ApiResponse {
    /// Error envelope. An empty `error_code` is treated as absent.
    pub fn error(message: impl Into<String>, status: StatusCode, error_code: Option<&str>) -> Self {
        Self {
            status,
            body: ResponseEnvelope {
                success: false,
                message: message.into(),
                timestamp: Utc::now(),
                data: None,
                error_code: error_code
                    .filter(|code| !code.is_empty())
                    .map(str::to_owned),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
