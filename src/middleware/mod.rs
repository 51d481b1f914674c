/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth::guard (bearer token), cors, http (request id / tracing / limits / panics)
 */
pub mod auth;
pub mod cors;
pub mod http;
