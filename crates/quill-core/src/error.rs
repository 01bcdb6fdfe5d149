//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Store-level errors.
///
/// Uniqueness and foreign-key violations are classified by the store itself,
/// so callers never have to inspect raw database messages.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Post title already used")]
    DuplicateTitle,

    #[error("Referenced {0} does not exist")]
    MissingReference(&'static str),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateEmail => DomainError::Duplicate("email".to_string()),
            RepoError::DuplicateTitle => DomainError::Duplicate("title".to_string()),
            other => DomainError::Internal(other.to_string()),
        }
    }
}
