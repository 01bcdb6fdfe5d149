//! Credential and session implementations.

mod password;
mod session;

pub use password::{Argon2PasswordService, MAX_SALT_LEN, MIN_SALT_LEN, PasswordConfig};
pub use session::{DEFAULT_SESSION_SECRET, JwtSessionService, SessionConfig};
