//! In-memory fakes of the ports, for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{AdminGrant, NewUser, User, UserId};
use crate::error::RepoError;
use crate::ports::{
    AuthError, IssuedSession, PasswordService, SessionClaims, SessionService, UserRepository,
};

pub(crate) fn user(id: UserId, email: &str, is_admin: bool) -> User {
    User {
        id,
        email: email.to_string(),
        password_hash: String::new(),
        name: email.to_string(),
        is_admin,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub(crate) struct FakeUsers {
    rows: Mutex<Vec<User>>,
}

impl FakeUsers {
    pub(crate) fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(RepoError::DuplicateEmail);
        }
        let is_admin = match new_user.admin {
            AdminGrant::Granted => true,
            AdminGrant::Denied => false,
            AdminGrant::IfFirstUser => rows.is_empty(),
        };
        let mut created = user(rows.len() as UserId + 1, &new_user.email, is_admin);
        created.name = new_user.name;
        created.password_hash = new_user.password_hash;
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Not a real hash; good enough to tell passwords apart.
pub(crate) struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

/// Tokens look like `session:<n>:<user id>`.
#[derive(Default)]
pub(crate) struct FakeSessions {
    issued: Mutex<u32>,
    ended: Mutex<HashSet<String>>,
}

#[async_trait]
impl SessionService for FakeSessions {
    fn start(&self, user_id: UserId) -> Result<IssuedSession, AuthError> {
        let mut issued = self.issued.lock().unwrap();
        *issued += 1;
        let session_id = issued.to_string();
        Ok(IssuedSession {
            token: format!("session:{session_id}:{user_id}"),
            claims: SessionClaims {
                session_id,
                user_id,
                expires_at: i64::MAX,
            },
        })
    }

    async fn resolve(&self, token: &str) -> Option<SessionClaims> {
        let mut parts = token.strip_prefix("session:")?.split(':');
        let session_id = parts.next()?.to_string();
        let user_id = parts.next()?.parse().ok()?;
        if self.ended.lock().unwrap().contains(&session_id) {
            return None;
        }
        Some(SessionClaims {
            session_id,
            user_id,
            expires_at: i64::MAX,
        })
    }

    async fn end(&self, token: &str) -> Result<(), AuthError> {
        let claims = self
            .resolve(token)
            .await
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
        self.ended.lock().unwrap().insert(claims.session_id);
        Ok(())
    }

    fn ttl_seconds(&self) -> i64 {
        3600
    }
}
