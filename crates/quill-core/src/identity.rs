//! Request identity resolution.

use crate::domain::User;
use crate::error::RepoError;
use crate::ports::{SessionService, UserRepository};

/// Map the request's session token to the logged-in user.
///
/// Returns `Ok(None)` for anonymous requests: no token, an invalid, expired
/// or ended session, or a session whose user no longer exists. Only store
/// faults are errors.
pub async fn resolve_current_identity(
    sessions: &dyn SessionService,
    users: &dyn UserRepository,
    token: Option<&str>,
) -> Result<Option<User>, RepoError> {
    let Some(token) = token else {
        return Ok(None);
    };
    let Some(claims) = sessions.resolve(token).await else {
        tracing::debug!("Session token rejected");
        return Ok(None);
    };

    let user = users.find_by_id(claims.user_id).await?;
    if user.is_none() {
        tracing::warn!(user_id = claims.user_id, "Session refers to a missing user");
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdminGrant, NewUser};
    use crate::testing::{FakeSessions, FakeUsers};

    async fn seeded() -> (FakeSessions, FakeUsers, i32) {
        let users = FakeUsers::default();
        let user = users
            .create(NewUser {
                email: "a@x.com".to_string(),
                name: "A".to_string(),
                password_hash: "plain$pw1".to_string(),
                admin: AdminGrant::Denied,
            })
            .await
            .unwrap();
        (FakeSessions::default(), users, user.id)
    }

    #[tokio::test]
    async fn test_no_token_is_anonymous() {
        let (sessions, users, _) = seeded().await;
        let identity = resolve_current_identity(&sessions, &users, None).await.unwrap();
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_started_session_resolves_to_user() {
        let (sessions, users, id) = seeded().await;
        let issued = sessions.start(id).unwrap();

        let identity = resolve_current_identity(&sessions, &users, Some(&issued.token))
            .await
            .unwrap();

        assert_eq!(identity.map(|u| u.email), Some("a@x.com".to_string()));
    }

    #[tokio::test]
    async fn test_ended_session_is_anonymous() {
        let (sessions, users, id) = seeded().await;
        let issued = sessions.start(id).unwrap();
        sessions.end(&issued.token).await.unwrap();

        let identity = resolve_current_identity(&sessions, &users, Some(&issued.token))
            .await
            .unwrap();

        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_session_of_missing_user_is_anonymous() {
        let (sessions, users, _) = seeded().await;
        let issued = sessions.start(99).unwrap();

        let identity = resolve_current_identity(&sessions, &users, Some(&issued.token))
            .await
            .unwrap();

        assert!(identity.is_none());
    }
}
