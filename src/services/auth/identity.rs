/*
 * Responsibility
 * - The verified identity a TokenVerifier hands back on success
 * - Handlers read it through getters only; it lives for a single request
 */
use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Identity decoded from a successfully verified ID token.
///
/// `claims` holds provider-specific claims that have no dedicated field
/// (for Firebase: `firebase`, custom claims, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedIdentity {
    uid: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    email_verified: Option<bool>,
    auth_time: Option<i64>,
    claims: HashMap<String, Value>,
}

impl DecodedIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            name: None,
            picture: None,
            email_verified: None,
            auth_time: None,
            claims: HashMap::new(),
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture;
        self
    }

    pub fn with_email_verified(mut self, verified: Option<bool>) -> Self {
        self.email_verified = verified;
        self
    }

    pub fn with_auth_time(mut self, auth_time: Option<i64>) -> Self {
        self.auth_time = auth_time;
        self
    }

    pub fn with_claims(mut self, claims: HashMap<String, Value>) -> Self {
        self.claims = claims;
        self
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    pub fn email_verified(&self) -> Option<bool> {
        self.email_verified
    }

    /// Unix seconds.
    pub fn auth_time(&self) -> Option<i64> {
        self.auth_time
    }

    pub fn claims(&self) -> &HashMap<String, Value> {
        &self.claims
    }

    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }
}
