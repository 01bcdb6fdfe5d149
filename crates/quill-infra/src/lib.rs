//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the SeaORM store (SQLite or PostgreSQL), Argon2 password hashing,
//! JWT sessions and the in-memory session revocation list.

pub mod auth;
pub mod database;
pub mod revocation;

pub use auth::{Argon2PasswordService, JwtSessionService, PasswordConfig, SessionConfig};
pub use database::{
    DatabaseConfig, SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmUserRepository,
};
pub use revocation::InMemoryRevocationList;
