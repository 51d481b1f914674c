/*
 * Responsibility
 * - HTTP surface: routes(), handlers, payload DTOs, extractors
 * - response: the envelope every endpoint answers with
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod response;
mod routes;

pub use routes::routes;
