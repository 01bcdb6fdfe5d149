//! Credential and session ports.

use async_trait::async_trait;

use crate::domain::UserId;

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    ///
    /// A malformed stored hash is a verification failure, not an error.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// What a valid session token says about its bearer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub session_id: String,
    pub user_id: UserId,
    /// Unix timestamp (seconds).
    pub expires_at: i64,
}

/// A freshly started session: the opaque token to hand to the client.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

/// Session service - binds later requests to a logged-in user.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Start a session for a user.
    fn start(&self, user_id: UserId) -> Result<IssuedSession, AuthError>;

    /// Resolve a token to its claims. Absent, forged, expired or ended
    /// sessions resolve to `None`.
    async fn resolve(&self, token: &str) -> Option<SessionClaims>;

    /// End the session a token belongs to.
    async fn end(&self, token: &str) -> Result<(), AuthError>;

    /// Session lifetime in seconds.
    fn ttl_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Revocation failed: {0}")]
    Revocation(String),
}
