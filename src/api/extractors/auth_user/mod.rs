/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - Hand the identity verified by the auth guard to handlers
 * - The identity type itself lives with the verifier (services::auth)
 *
 * Public API:
 * - AuthUser
 */

mod core;

pub use self::core::AuthUser;
