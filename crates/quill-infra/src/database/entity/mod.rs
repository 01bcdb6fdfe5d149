//! SeaORM entities: `users`, `blog_posts`, `comments`.

pub mod comment;
pub mod post;
pub mod user;
