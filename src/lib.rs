//! Minimal HTTP API that authenticates requests with Firebase ID tokens.
//!
//! - `middleware::auth`: the bearer token guard
//! - `api::response`: the envelope every response is wrapped in
//! - `services::auth`: the `TokenVerifier` seam and its Firebase implementation

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
