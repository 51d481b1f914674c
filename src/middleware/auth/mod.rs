pub mod error;
pub mod guard;

pub use error::AuthError;
pub use guard::{authenticate, extract_token, guard};
