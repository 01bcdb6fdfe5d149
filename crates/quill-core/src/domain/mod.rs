//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentId, NewComment};
pub use post::{BlogPost, NewPost, POST_DATE_FORMAT, PostFields, PostId};
pub use user::{AdminGrant, AdminPolicy, NewUser, User, UserId};

use serde::Serialize;

/// An entity together with its resolved author.
///
/// Serializes flat, so templates can read `post.title` and `post.author.name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authored<T> {
    #[serde(flatten)]
    pub item: T,
    pub author: User,
}
