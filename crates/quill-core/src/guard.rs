//! Authorization guard for admin-only operations (create, edit, delete post).

use crate::domain::User;

/// The current identity is not the administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("administrator identity required")]
pub struct Unauthorized;

/// Allow the request only if the identity is present and carries the
/// administrator flag. Returns the acting administrator on success.
///
/// Call it first thing in every protected handler, before any lookup or
/// mutation.
pub fn require_admin(identity: Option<&User>) -> Result<&User, Unauthorized> {
    match identity {
        Some(user) if user.is_admin => Ok(user),
        _ => Err(Unauthorized),
    }
}
