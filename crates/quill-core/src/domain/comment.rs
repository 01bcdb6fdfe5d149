use serde::Serialize;

use super::post::PostId;
use super::user::UserId;

pub type CommentId = i32;

/// Comment entity - left by a logged-in user under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub post_id: PostId,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}
