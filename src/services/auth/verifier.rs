//! Token verification interface used by the auth guard.
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::identity::DecodedIdentity;

/// Why a token could not be turned into a `DecodedIdentity`.
///
/// Note:
/// - Expired, malformed, wrongly signed, revoked and wrong-audience tokens are
///   all `Rejected`; the guard does not tell them apart beyond the reason text.
/// - `Unexpected` is for failures of the verifier itself (key fetch, backend
///   outage), not for bad tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Unexpected(String),
}

impl VerifyError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::Unexpected(reason.into())
    }
}

/// Verifies bearer tokens against an external identity provider.
///
/// Built once at startup and shared across requests, so implementations must
/// hold no per-call mutable state and must not keep the token around.
#[async_trait]
pub trait TokenVerifier: Send + Sync + 'static {
    // Returns the provider name (for logging).
    fn provider_name(&self) -> &'static str;

    async fn verify_token(&self, token: &str) -> Result<DecodedIdentity, VerifyError>;
}

pub type SharedVerifier = Arc<dyn TokenVerifier>;
