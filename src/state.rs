/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - verifier: the single TokenVerifier built at startup
 * - Clone is cheap (Arc inside)
 */
use std::fmt;

use crate::services::auth::SharedVerifier;

#[derive(Clone)]
pub struct AppState {
    pub verifier: SharedVerifier,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("verifier", &self.verifier.provider_name())
            .finish()
    }
}

impl AppState {
    pub fn new(verifier: SharedVerifier) -> Self {
        Self { verifier }
    }
}
