use chrono::{DateTime, Utc};
use serde::Serialize;

pub type UserId = i32;

/// User entity - a registered reader/commenter, possibly the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// How the administrator flag is decided when a user row is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminGrant {
    Granted,
    Denied,
    /// Granted only if no other user exists at insert time. Resolved inside
    /// the insert transaction.
    IfFirstUser,
}

/// A user about to be created. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub admin: AdminGrant,
}

/// Which account becomes the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminPolicy {
    /// The first account ever registered.
    #[default]
    FirstUser,
    /// The account registered with this exact email.
    Email(String),
}

impl AdminPolicy {
    pub fn grant_for(&self, email: &str) -> AdminGrant {
        match self {
            AdminPolicy::FirstUser => AdminGrant::IfFirstUser,
            AdminPolicy::Email(admin) if admin == email => AdminGrant::Granted,
            AdminPolicy::Email(_) => AdminGrant::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_policy_is_exact_match() {
        let policy = AdminPolicy::Email("boss@blog.dev".to_string());

        assert_eq!(policy.grant_for("boss@blog.dev"), AdminGrant::Granted);
        assert_eq!(policy.grant_for("Boss@blog.dev"), AdminGrant::Denied);
        assert_eq!(policy.grant_for("reader@blog.dev"), AdminGrant::Denied);
    }

    #[test]
    fn test_first_user_policy_defers_to_store() {
        assert_eq!(
            AdminPolicy::default().grant_for("anyone@blog.dev"),
            AdminGrant::IfFirstUser
        );
    }
}
