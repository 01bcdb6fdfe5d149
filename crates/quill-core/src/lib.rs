//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the entities, the ports infrastructure must implement,
//! and the account/identity/authorization rules. It has no database or HTTP
//! dependencies.

pub mod accounts;
pub mod domain;
pub mod error;
pub mod guard;
pub mod identity;
pub mod ports;

#[cfg(test)]
mod testing;

pub use error::{DomainError, RepoError};
