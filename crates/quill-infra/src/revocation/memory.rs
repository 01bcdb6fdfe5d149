//! In-memory revocation list. Entries are lost on restart, which only
//! revives sessions that were ended before the restart and have not expired.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{RevocationError, RevocationList};

/// Revoked session ids with the instant after which they can be forgotten.
pub struct InMemoryRevocationList {
    revoked: RwLock<HashMap<String, Instant>>,
}

impl InMemoryRevocationList {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries still held, expired or not.
    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }
}

impl Default for InMemoryRevocationList {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationList for InMemoryRevocationList {
    async fn revoke(&self, session_id: &str, ttl: Duration) -> Result<(), RevocationError> {
        let now = Instant::now();
        let mut revoked = self.revoked.write().await;

        // Expired tokens are rejected on signature validation already.
        revoked.retain(|_, forget_at| *forget_at > now);
        revoked.insert(session_id.to_string(), now + ttl);

        Ok(())
    }

    async fn is_revoked(&self, session_id: &str) -> bool {
        let revoked = self.revoked.read().await;
        revoked
            .get(session_id)
            .map(|forget_at| Instant::now() <= *forget_at)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let list = InMemoryRevocationList::new();
        list.revoke("s1", Duration::from_secs(60)).await.unwrap();

        assert!(list.is_revoked("s1").await);
        assert!(!list.is_revoked("s2").await);
    }

    #[tokio::test]
    async fn test_expired_entries_are_pruned() {
        let list = InMemoryRevocationList::new();
        list.revoke("old", Duration::ZERO).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(!list.is_revoked("old").await);

        list.revoke("new", Duration::from_secs(60)).await.unwrap();
        assert_eq!(list.len().await, 1);
    }
}
