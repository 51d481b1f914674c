/*
 * Responsibility
 * - Payloads returned by the /auth routes (placed under `data` of the envelope)
 */
use serde::Serialize;
use serde_json::Value;

use crate::services::auth::DecodedIdentity;

pub const ANONYMOUS_NAME: &str = "Anonymous";

#[derive(Debug, Serialize)]
pub struct HelloUser {
    pub uid: String,
    pub email: Option<String>,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
    pub user: HelloUser,
    pub auth_time: Option<i64>,
}

impl HelloResponse {
    pub fn new(message: &'static str, identity: &DecodedIdentity) -> Self {
        Self {
            message,
            user: HelloUser {
                uid: identity.uid().to_string(),
                email: identity.email().map(str::to_owned),
                name: identity.name().unwrap_or(ANONYMOUS_NAME).to_string(),
            },
            auth_time: identity.auth_time(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub received_data: Value,
    pub authenticated_user: Option<String>,
    pub user_id: String,
}

impl ProtectedResponse {
    pub fn new(message: &'static str, received_data: Value, identity: &DecodedIdentity) -> Self {
        Self {
            message,
            received_data,
            authenticated_user: identity.email().map(str::to_owned),
            user_id: identity.uid().to_string(),
        }
    }
}
