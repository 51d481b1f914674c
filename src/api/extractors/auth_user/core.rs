use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::middleware::auth::AuthError;
use crate::services::auth::DecodedIdentity;

/// Extractor giving handlers the `DecodedIdentity` for this request.
/// Relies on the auth guard having inserted it into request extensions;
/// on an unguarded route it rejects with 401 like a request without a header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub DecodedIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DecodedIdentity>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::MissingHeader)
    }
}
