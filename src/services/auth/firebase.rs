use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation};
use serde::Deserialize;
use serde_json::Value;

use super::identity::DecodedIdentity;
use super::jwks::{KeySetError, KeyStore};
use super::verifier::{TokenVerifier, VerifyError};

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const MAX_UID_LENGTH: usize = 128;
// Firebase Admin SDKs verify with zero clock skew by default.
const CLOCK_SKEW_SECONDS: u64 = 0;

/// Claims carried by a Firebase ID token.
///
/// Anything without a dedicated field (e.g. `firebase`, `user_id`, custom
/// claims) ends up in `extra` and is handed to handlers as provider claims.
/// Registered claims are validated by `jsonwebtoken`; they are declared here
/// only to keep them out of `extra`.
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
struct FirebaseClaims {
    #[serde(default)]
    aud: Value,
    #[serde(default)]
    iss: String,
    #[serde(default)]
    sub: String,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    auth_time: Option<i64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

/// RS256 verifier for Firebase ID tokens.
///
/// `jsonwebtoken::Validation` checks signature, `exp`, `aud` and `iss`.
/// This type additionally checks:
/// - the header names a `kid` that Google currently publishes
/// - `sub` is present, non-empty and at most 128 chars
/// - `iat` and `auth_time` are not in the future
#[derive(Debug)]
pub struct FirebaseVerifier {
    project_id: String,
    issuer: String,
    keys: KeyStore,
    validation: Validation,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>, keys: KeyStore) -> Self {
        let project_id = project_id.into();
        let issuer = format!("{ISSUER_PREFIX}{project_id}");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&project_id]);
        validation.set_issuer(&[&issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);
        validation.leeway = CLOCK_SKEW_SECONDS;

        Self {
            project_id,
            issuer,
            keys,
            validation,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn verify(&self, token: &str) -> Result<DecodedIdentity, VerifyError> {
        if token.is_empty() {
            return Err(VerifyError::rejected(
                "Illegal ID token provided. ID token must be a non-empty string.",
            ));
        }

        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            VerifyError::rejected(format!("Decoding Firebase ID token failed: {e}"))
        })?;

        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::rejected(format!(
                "Firebase ID token has incorrect algorithm. Expected \"RS256\" but got \"{:?}\".",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| VerifyError::rejected("Firebase ID token has no \"kid\" claim."))?;

        let key = self.keys.decoding_key(&kid).await.map_err(|e| match e {
            KeySetError::NoMatchingKey(_) | KeySetError::UnsupportedKey(_) => {
                VerifyError::rejected(format!(
                    "Firebase ID token has \"kid\" claim which does not correspond to a known public key ({kid})."
                ))
            }
            KeySetError::Client(_) | KeySetError::Fetch(_) => VerifyError::unexpected(e.to_string()),
        })?;

        let claims = jsonwebtoken::decode::<FirebaseClaims>(token, &key, &self.validation)
            .map_err(|e| self.rejection(&e))?
            .claims;

        self.check_claims(&claims)?;

        Ok(into_identity(claims))
    }

    fn check_claims(&self, claims: &FirebaseClaims) -> Result<(), VerifyError> {
        if claims.sub.is_empty() {
            return Err(VerifyError::rejected(
                "Firebase ID token has an empty string \"sub\" (subject) claim.",
            ));
        }
        if claims.sub.len() > MAX_UID_LENGTH {
            return Err(VerifyError::rejected(
                "Firebase ID token has a \"sub\" (subject) claim longer than 128 characters.",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let skew = CLOCK_SKEW_SECONDS as i64;

        if claims.iat.is_some_and(|iat| iat > now + skew) {
            return Err(VerifyError::rejected(
                "Firebase ID token issued at future timestamp.",
            ));
        }
        if claims.auth_time.is_some_and(|t| t > now + skew) {
            return Err(VerifyError::rejected(
                "Firebase ID token has a \"auth_time\" claim in the future.",
            ));
        }

        Ok(())
    }

    fn rejection(&self, err: &jsonwebtoken::errors::Error) -> VerifyError {
        let reason = match err.kind() {
            ErrorKind::ExpiredSignature => {
                "Token expired. Get a fresh ID token and try again.".to_string()
            }
            ErrorKind::InvalidAudience => format!(
                "Firebase ID token has incorrect \"aud\" (audience) claim. Expected \"{}\".",
                self.project_id
            ),
            ErrorKind::InvalidIssuer => format!(
                "Firebase ID token has incorrect \"iss\" (issuer) claim. Expected \"{}\".",
                self.issuer
            ),
            ErrorKind::InvalidSignature => "Firebase ID token has invalid signature.".to_string(),
            ErrorKind::ImmatureSignature => "Firebase ID token is not yet valid.".to_string(),
            ErrorKind::MissingRequiredClaim(claim) => {
                format!("Firebase ID token has no \"{claim}\" claim.")
            }
            _ => format!("Decoding Firebase ID token failed: {err}"),
        };

        VerifyError::Rejected(reason)
    }
}

fn into_identity(claims: FirebaseClaims) -> DecodedIdentity {
    DecodedIdentity::new(claims.sub)
        .with_email(claims.email)
        .with_name(claims.name)
        .with_picture(claims.picture)
        .with_email_verified(claims.email_verified)
        .with_auth_time(claims.auth_time)
        .with_claims(claims.extra)
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    fn provider_name(&self) -> &'static str {
        "firebase"
    }

    async fn verify_token(&self, token: &str) -> Result<DecodedIdentity, VerifyError> {
        self.verify(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::test_support::{TEST_KID, sign, static_keys};
    use serde_json::json;

    const PROJECT: &str = "demo-project";

    fn verifier() -> FirebaseVerifier {
        FirebaseVerifier::new(PROJECT, static_keys())
    }

    fn claims() -> Value {
        let now = chrono::Utc::now().timestamp();
        json!({
            "iss": format!("{ISSUER_PREFIX}{PROJECT}"),
            "aud": PROJECT,
            "sub": "uid-123",
            "user_id": "uid-123",
            "iat": now - 10,
            "exp": now + 3600,
            "auth_time": now - 20,
            "email": "alice@example.com",
            "email_verified": true,
            "name": "Alice",
            "picture": "https://example.com/alice.png",
            "firebase": {
                "identities": { "email": ["alice@example.com"] },
                "sign_in_provider": "password"
            }
        })
    }

    fn with(mut claims: Value, key: &str, value: Value) -> Value {
        claims[key] = value;
        claims
    }

    fn rejected_reason(result: Result<DecodedIdentity, VerifyError>) -> String {
        match result {
            Err(VerifyError::Rejected(reason)) => reason,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_token_decodes_identity() {
        let token = sign(&claims(), Some(TEST_KID));
        let identity = verifier().verify_token(&token).await.unwrap();

        assert_eq!(identity.uid(), "uid-123");
        assert_eq!(identity.email(), Some("alice@example.com"));
        assert_eq!(identity.name(), Some("Alice"));
        assert_eq!(identity.picture(), Some("https://example.com/alice.png"));
        assert_eq!(identity.email_verified(), Some(true));
        assert!(identity.auth_time().is_some());
        assert_eq!(
            identity.claim("firebase").unwrap()["sign_in_provider"],
            json!("password")
        );
        assert_eq!(identity.claim("user_id"), Some(&json!("uid-123")));
        assert!(identity.claim("iss").is_none());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(&with(claims(), "exp", json!(now - 60)), Some(TEST_KID));

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.starts_with("Token expired"), "{reason}");
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let token = sign(&with(claims(), "aud", json!("other-project")), Some(TEST_KID));

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("\"aud\""), "{reason}");
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let token = sign(
            &with(claims(), "iss", json!("https://accounts.google.com")),
            Some(TEST_KID),
        );

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("\"iss\""), "{reason}");
    }

    #[tokio::test]
    async fn missing_kid_is_rejected() {
        let token = sign(&claims(), None);

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("no \"kid\""), "{reason}");
    }

    #[tokio::test]
    async fn unknown_kid_is_rejected() {
        let token = sign(&claims(), Some("rotated-away"));

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("rotated-away"), "{reason}");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let reason = rejected_reason(verifier().verify_token("abc123").await);
        assert!(reason.starts_with("Decoding Firebase ID token failed"), "{reason}");
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let reason = rejected_reason(verifier().verify_token("").await);
        assert!(reason.contains("non-empty"), "{reason}");
    }

    #[tokio::test]
    async fn empty_subject_is_rejected() {
        let token = sign(&with(claims(), "sub", json!("")), Some(TEST_KID));

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("\"sub\""), "{reason}");
    }

    #[tokio::test]
    async fn overlong_subject_is_rejected() {
        let token = sign(&with(claims(), "sub", json!("u".repeat(129))), Some(TEST_KID));

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("128"), "{reason}");
    }

    #[tokio::test]
    async fn future_auth_time_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(&with(claims(), "auth_time", json!(now + 600)), Some(TEST_KID));

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("auth_time"), "{reason}");
    }

    #[tokio::test]
    async fn non_rs256_token_is_rejected() {
        let header = jsonwebtoken::Header::new(Algorithm::HS256);
        let token = jsonwebtoken::encode(
            &header,
            &claims(),
            &jsonwebtoken::EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let reason = rejected_reason(verifier().verify_token(&token).await);
        assert!(reason.contains("incorrect algorithm"), "{reason}");
    }

    #[tokio::test]
    async fn key_fetch_failure_is_unexpected_not_rejection() {
        let keys = KeyStore::remote("http://127.0.0.1:9/jwks.json").unwrap();
        let verifier = FirebaseVerifier::new(PROJECT, keys);
        let token = sign(&claims(), Some(TEST_KID));

        let err = verifier.verify_token(&token).await.unwrap_err();
        assert!(matches!(err, VerifyError::Unexpected(_)), "{err:?}");
    }
}
