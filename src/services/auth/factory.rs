/// Factory: build the process-wide `TokenVerifier` from application `Config`.
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::services::auth::credentials::CredentialError;
use crate::services::auth::firebase::FirebaseVerifier;
use crate::services::auth::jwks::{KeySetError, KeyStore};
use crate::services::auth::verifier::SharedVerifier;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to load Firebase credentials: {0}")]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    KeySet(#[from] KeySetError),
}

/// Runs once at startup. Any error here must stop the process before it
/// binds a listener.
pub fn build_verifier(config: &Config) -> Result<SharedVerifier, InitError> {
    let source = &config.credential_source;
    let account = source.load().inspect_err(|e| {
        tracing::error!(error = %e, source = source.describe(), "error initializing Firebase");
    })?;
    tracing::info!("using Firebase service account from {}", source.describe());

    let project_id = config
        .firebase_project_id
        .clone()
        .unwrap_or_else(|| account.project_id.clone());

    let keys = KeyStore::remote(config.jwks_url.as_str())?;
    let verifier = FirebaseVerifier::new(project_id, keys);

    tracing::info!(
        project_id = verifier.project_id(),
        "Firebase token verifier initialized"
    );

    Ok(Arc::new(verifier))
}
