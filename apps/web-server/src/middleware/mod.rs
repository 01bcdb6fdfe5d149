//! Extractors and middleware shared by the handlers.

pub mod admin;
pub mod error;
pub mod flash;
pub mod identity;

pub use admin::AdminOnly;
pub use error::{AppError, AppResult, error_pages};
pub use flash::Flashes;
pub use identity::CurrentUser;
