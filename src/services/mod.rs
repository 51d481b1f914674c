/*
 * Responsibility
 * - Process-level services shared through AppState (token verification)
 */
pub mod auth;
