//! Bearer token guard: header check → token extraction → verification →
//! continuation with the decoded identity.
//!
//! - `Authorization: Bearer <token>` is the documented form, but a header
//!   without the `Bearer ` prefix is accepted and used verbatim as the token.
//! - Verification is attempted exactly once per request. There are no retries.
//! - Every failure is a 401 built by the shared envelope; the wrapped
//!   operation never runs on failure.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use super::error::AuthError;
use crate::services::auth::{DecodedIdentity, SharedVerifier, VerifyError};
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Guard every route of `router`.
///
/// Uses `route_layer`, so unmatched paths still fall through to the 404
/// fallback instead of being answered with a 401.
///
/// ```ignore
/// let protected = Router::new().route("/user/profile", get(profile));
/// let protected = middleware::auth::guard::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn require_auth(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    guard(&state.verifier, req, |mut req, identity| async move {
        // read back by the AuthUser extractor
        req.extensions_mut().insert(identity);
        next.run(req).await
    })
    .await
}

/// Run `operation` only if `req` carries a token the verifier accepts.
///
/// The decoded identity is handed to the continuation as a value; the
/// operation's output is returned unmodified.
pub async fn guard<B, F, Fut, R>(verifier: &SharedVerifier, req: Request<B>, operation: F) -> Response
where
    F: FnOnce(Request<B>, DecodedIdentity) -> Fut,
    Fut: Future<Output = R>,
    R: IntoResponse,
{
    match authenticate(verifier, req.headers()).await {
        Ok(identity) => operation(req, identity).await.into_response(),
        Err(err) => err.into_response(),
    }
}

/// Header check, token extraction and a single verification call.
pub async fn authenticate(
    verifier: &SharedVerifier,
    headers: &HeaderMap,
) -> Result<DecodedIdentity, AuthError> {
    let token = extract_token(headers)?.to_owned();

    // Verification runs on its own task: it always runs to completion, and a
    // panicking verifier fails only this request.
    let verifier = Arc::clone(verifier);
    let provider = verifier.provider_name();
    let outcome = tokio::spawn(async move { verifier.verify_token(&token).await }).await;

    let result = match outcome {
        Ok(Ok(identity)) => Ok(identity),
        Ok(Err(VerifyError::Rejected(reason))) => Err(AuthError::InvalidToken(reason)),
        Ok(Err(VerifyError::Unexpected(reason))) => Err(AuthError::VerificationFailure(reason)),
        Err(join_err) => {
            let text = if join_err.is_panic() {
                panic_text(join_err.into_panic())
            } else {
                join_err.to_string()
            };
            Err(AuthError::VerificationFailure(text))
        }
    };

    if let Err(err) = &result {
        tracing::warn!(provider, error = %err, "token verification failed");
    }

    result
}

/// Token from the `Authorization` header.
///
/// - missing or empty header → `MissingHeader`
/// - header bytes that are not visible ASCII → `MalformedHeader`
/// - `Bearer <token>` → everything after the prefix
/// - anything else → the whole value
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingHeader)?;

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
}

fn panic_text(payload: Box<dyn Any + Send + 'static>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "token verifier panicked".to_string()
    }
}
