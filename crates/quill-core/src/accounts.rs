//! Account use cases: registration and password login.

use crate::domain::{AdminPolicy, NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Why a login attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("No account registered with that email")]
    UnknownEmail,

    #[error("Password does not match")]
    WrongPassword,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Hash the password and create the account.
///
/// Email uniqueness is left to the store's unique constraint: a taken email
/// comes back as `DomainError::Duplicate` and nothing is written.
pub async fn register(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    policy: &AdminPolicy,
    registration: Registration,
) -> Result<User, DomainError> {
    let password_hash = passwords
        .hash(&registration.password)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let admin = policy.grant_for(&registration.email);
    let user = users
        .create(NewUser {
            email: registration.email,
            name: registration.name,
            password_hash,
            admin,
        })
        .await?;

    tracing::info!(user_id = user.id, is_admin = user.is_admin, "User registered");
    Ok(user)
}

/// Check an email/password pair against the stored account.
pub async fn authenticate(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    email: &str,
    password: &str,
) -> Result<User, LoginError> {
    let user = users
        .find_by_email(email)
        .await?
        .ok_or(LoginError::UnknownEmail)?;

    if !passwords.verify(password, &user.password_hash) {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(LoginError::WrongPassword);
    }

    Ok(user)
}
