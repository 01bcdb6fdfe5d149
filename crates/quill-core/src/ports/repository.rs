use async_trait::async_trait;

use crate::domain::{
    Authored, BlogPost, Comment, NewComment, NewPost, NewUser, PostFields, PostId, User, UserId,
};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `DuplicateEmail` if the email is taken;
    /// no row is written in that case.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// Exact-match lookup, case-sensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Blog post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post. Fails with `DuplicateTitle` if the title is taken.
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError>;

    /// Overwrite the editable fields and reassign the author.
    /// The date is kept.
    async fn update(
        &self,
        id: PostId,
        fields: PostFields,
        author_id: UserId,
    ) -> Result<BlogPost, RepoError>;

    /// Delete a post together with its comments.
    async fn delete(&self, id: PostId) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Authored<BlogPost>>, RepoError>;

    /// All posts in insertion order.
    async fn list(&self) -> Result<Vec<Authored<BlogPost>>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// Comments of a post in insertion order.
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Authored<Comment>>, RepoError>;
}
