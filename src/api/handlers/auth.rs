/*
 * Responsibility
 * - GET /auth/hello, POST /auth/protected (both guarded)
 * - The identity comes from AuthUser; request bodies are passed through as-is
 */
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde_json::{Map, Value};

use crate::api::dto::auth::{HelloResponse, ProtectedResponse};
use crate::api::extractors::AuthUser;
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub async fn hello(AuthUser(user): AuthUser) -> ApiResponse<HelloResponse> {
    tracing::debug!(uid = user.uid(), "hello");

    ApiResponse::ok(
        HelloResponse::new("Hello from authenticated Rust backend!", &user),
        "Authentication successful",
    )
}

pub async fn protected(
    AuthUser(user): AuthUser,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<ProtectedResponse>, AppError> {
    let body = body.map_err(body_error)?;
    let received = parse_body(&body)?;

    Ok(ApiResponse::ok(
        ProtectedResponse::new("This is a protected endpoint", received, &user),
        "Protected endpoint accessed successfully",
    ))
}

fn body_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::bad_request(rejection.body_text())
    }
}

/// Request body as JSON. Empty or "empty-ish" JSON (`null`, `false`, `0`,
/// `""`, `[]`, `{}`) becomes `{}`.
fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(empty_object());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| AppError::bad_request(e.to_string()))?;

    Ok(if is_blank(&value) { empty_object() } else { value })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn blank_json_values_become_empty_object() {
        for raw in ["null", "false", "0", "\"\"", "[]", "{}"] {
            assert_eq!(parse_body(raw.as_bytes()).unwrap(), json!({}), "{raw}");
        }
    }

    #[test]
    fn json_body_is_passed_through() {
        assert_eq!(
            parse_body(br#"{"note":"hi","n":[1,2]}"#).unwrap(),
            json!({ "note": "hi", "n": [1, 2] })
        );
        assert_eq!(parse_body(b"42").unwrap(), json!(42));
    }

    #[test]
    fn invalid_json_is_bad_request() {
        let err = parse_body(b"{not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
