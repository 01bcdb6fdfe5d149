use async_trait::async_trait;
use std::time::Duration;

/// Revocation list - session ids that were ended before their expiry.
#[async_trait]
pub trait RevocationList: Send + Sync {
    /// Revoke a session id. The entry may be forgotten after `ttl`, once the
    /// session would have expired anyway.
    async fn revoke(&self, session_id: &str, ttl: Duration) -> Result<(), RevocationError>;

    /// Check whether a session id was revoked.
    async fn is_revoked(&self, session_id: &str) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum RevocationError {
    #[error("Backend error: {0}")]
    Backend(String),
}
