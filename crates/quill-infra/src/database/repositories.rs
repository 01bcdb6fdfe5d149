//! SeaORM repository implementations.
//!
//! Uniqueness (email, title) is enforced by unique indexes and surfaced as a
//! single failed insert/update; there is no check-then-insert.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use quill_core::domain::{
    AdminGrant, Authored, BlogPost, Comment, NewComment, NewPost, NewUser, PostFields, PostId,
    User, UserId,
};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::base::SeaOrmRepository;
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::errors::{db_error, write_error};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM blog post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// SeaORM comment repository.
pub type SeaOrmCommentRepository = SeaOrmRepository<CommentEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match (chars.next(), chars.next()) {
                (Some(first), Some(_)) => format!("{first}***@{domain}"),
                _ => format!("***@{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

/// Attach the joined author; a missing author means a broken foreign key.
fn authored<M, T>((model, author): (M, Option<user::Model>)) -> Result<Authored<T>, RepoError>
where
    T: From<M>,
{
    let author = author.ok_or(RepoError::MissingReference("user"))?;
    Ok(Authored {
        item: model.into(),
        author: author.into(),
    })
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let is_admin = match new_user.admin {
            AdminGrant::Granted => true,
            AdminGrant::Denied => false,
            AdminGrant::IfFirstUser => UserEntity::find().count(&txn).await.map_err(db_error)? == 0,
        };

        let model = user::ActiveModel {
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            is_admin: Set(is_admin),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| write_error(e, RepoError::DuplicateEmail, "user"))?;

        txn.commit().await.map_err(db_error)?;

        tracing::debug!(user_id = model.id, user_email = %mask_email(&model.email), "User created");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(db_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<BlogPost, RepoError> {
        let fields = new_post.fields;

        let model = post::ActiveModel {
            author_id: Set(new_post.author_id),
            title: Set(fields.title),
            subtitle: Set(fields.subtitle),
            date: Set(new_post.date),
            body: Set(fields.body),
            img_url: Set(fields.img_url),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| write_error(e, RepoError::DuplicateTitle, "user"))?;

        tracing::info!(post_id = model.id, author_id = model.author_id, "Post created");
        Ok(model.into())
    }

    async fn update(
        &self,
        id: PostId,
        fields: PostFields,
        author_id: UserId,
    ) -> Result<BlogPost, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let mut active = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();

        active.title = Set(fields.title);
        active.subtitle = Set(fields.subtitle);
        active.body = Set(fields.body);
        active.img_url = Set(fields.img_url);
        active.author_id = Set(author_id);

        let model = active
            .update(&txn)
            .await
            .map_err(|e| write_error(e, RepoError::DuplicateTitle, "user"))?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(post_id = id, author_id, "Post updated");
        Ok(model.into())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let comments = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back.
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(db_error)?;

        tracing::info!(
            post_id = id,
            comments_deleted = comments.rows_affected,
            "Post deleted"
        );
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Authored<BlogPost>>, RepoError> {
        PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(self.db.as_ref())
            .await
            .map_err(db_error)?
            .map(authored)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Authored<BlogPost>>, RepoError> {
        PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_error)?
            .into_iter()
            .map(authored)
            .collect()
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel {
            author_id: Set(new_comment.author_id),
            post_id: Set(new_comment.post_id),
            text: Set(new_comment.text),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        // Comments have no unique column besides the id.
        .map_err(|e| write_error(e, RepoError::MissingReference("post"), "post"))?;

        tracing::info!(
            comment_id = model.id,
            post_id = model.post_id,
            author_id = model.author_id,
            "Comment created"
        );
        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Authored<Comment>>, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_error)?
            .into_iter()
            .map(authored)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@blog.dev"), "a***@blog.dev");
        assert_eq!(mask_email("a@blog.dev"), "***@blog.dev");
        assert_eq!(mask_email("no-at-sign"), "***");
    }
}
