//! Classification of `DbErr` into store errors.

use sea_orm::{DbErr, SqlErr};

use quill_core::error::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
}

/// Which constraint, if any, a failed statement violated.
pub(crate) fn violation(err: &DbErr) -> Option<Violation> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return Some(Violation::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Some(Violation::ForeignKey),
        _ => {}
    }

    // Drivers that don't surface an error code
    let msg = err.to_string().to_lowercase();
    if msg.contains("unique") || msg.contains("duplicate") {
        Some(Violation::Unique)
    } else if msg.contains("foreign key") {
        Some(Violation::ForeignKey)
    } else {
        None
    }
}

/// Errors without a domain meaning.
pub(crate) fn db_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Map a failed write, naming what a unique or foreign-key violation means
/// for this particular statement.
pub(crate) fn write_error(
    err: DbErr,
    on_unique: RepoError,
    missing_reference: &'static str,
) -> RepoError {
    match violation(&err) {
        Some(Violation::Unique) => on_unique,
        Some(Violation::ForeignKey) => RepoError::MissingReference(missing_reference),
        None => db_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textual_fallback() {
        let unique = DbErr::Custom("UNIQUE constraint failed: users.email".to_string());
        let fk = DbErr::Custom("FOREIGN KEY constraint failed".to_string());
        let other = DbErr::Custom("syntax error".to_string());

        assert_eq!(violation(&unique), Some(Violation::Unique));
        assert_eq!(violation(&fk), Some(Violation::ForeignKey));
        assert_eq!(violation(&other), None);
    }

    #[test]
    fn test_write_error_mapping() {
        let err = DbErr::Custom("duplicate key value violates unique constraint".to_string());
        assert!(matches!(
            write_error(err, RepoError::DuplicateTitle, "user"),
            RepoError::DuplicateTitle
        ));

        let err = DbErr::Custom("FOREIGN KEY constraint failed".to_string());
        assert!(matches!(
            write_error(err, RepoError::DuplicateTitle, "user"),
            RepoError::MissingReference("user")
        ));

        let err = DbErr::RecordNotFound("x".to_string());
        assert!(matches!(
            write_error(err, RepoError::DuplicateTitle, "user"),
            RepoError::Query(_)
        ));
    }
}
