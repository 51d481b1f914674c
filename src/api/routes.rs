/*
 * Responsibility
 * - URL structure of the API
 * - Public: /, /health
 * - Guarded (bearer token): /auth/hello, /auth/protected, /user/profile
 * - Fallbacks for unknown paths (404) and wrong methods (405), both enveloped
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{auth, fallback, health::health, user};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(health))
        .route("/health", get(health));

    let protected = Router::new()
        .route("/auth/hello", get(auth::hello))
        .route("/auth/protected", post(auth::protected))
        .route("/user/profile", get(user::profile));
    let protected = middleware::auth::guard::apply(protected, state);

    // Set after the merge so it replaces the default 405 on guarded routes
    // too; a wrong method is answered before the guard runs.
    public
        .merge(protected)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .fallback(fallback::not_found)
}
