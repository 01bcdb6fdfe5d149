//! Database connection management and the SeaORM-backed store.

mod base;
mod connections;
mod errors;
mod repositories;

pub mod entity;

pub use base::SeaOrmRepository;
pub use connections::{DatabaseConfig, connect};
pub use repositories::{SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmUserRepository};
