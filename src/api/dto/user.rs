use serde::Serialize;
use serde_json::{Map, Value};

use crate::services::auth::DecodedIdentity;

/// Extended identity returned by `GET /user/profile`.
///
/// Missing optional claims serialize as `null`; `firebase` falls back to `{}`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub auth_time: Option<i64>,
    pub firebase: Value,
}

impl From<&DecodedIdentity> for ProfileResponse {
    fn from(identity: &DecodedIdentity) -> Self {
        Self {
            uid: identity.uid().to_string(),
            email: identity.email().map(str::to_owned),
            email_verified: identity.email_verified(),
            name: identity.name().map(str::to_owned),
            picture: identity.picture().map(str::to_owned),
            auth_time: identity.auth_time(),
            firebase: identity
                .claim("firebase")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}
