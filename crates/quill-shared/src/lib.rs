//! # Quill Shared
//!
//! Types exchanged with the browser: submitted forms with their validation
//! rules, and the error page payload.

pub mod error_page;
pub mod forms;

pub use error_page::ErrorPage;
pub use forms::{CommentForm, FieldErrors, LoginForm, PostForm, RegisterForm, validate_form};
