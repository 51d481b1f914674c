pub mod credentials;
pub mod factory;
pub mod firebase;
pub mod identity;
pub mod jwks;
#[cfg(test)]
pub(crate) mod test_support;
pub mod verifier;

pub use factory::build_verifier;
pub use identity::DecodedIdentity;
pub use verifier::{SharedVerifier, TokenVerifier, VerifyError};
