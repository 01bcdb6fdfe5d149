//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod revocation;

pub use auth::{AuthError, IssuedSession, PasswordService, SessionClaims, SessionService};
pub use repository::{CommentRepository, PostRepository, UserRepository};
pub use revocation::{RevocationError, RevocationList};
