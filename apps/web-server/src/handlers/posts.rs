//! Post pages, comments and the admin-only post management.
//!
//! The admin routes sit behind `AdminOnly`, which turns everyone else away
//! before the form is read. The handlers still call `require_admin` before
//! touching the store, so a non-admin is redirected to login even for a post
//! that does not exist.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::domain::{NewComment, NewPost, PostFields, PostId};
use quill_core::error::RepoError;
use quill_core::guard::require_admin;
use quill_shared::{CommentForm, FieldErrors, PostForm, validate_form};

use crate::middleware::flash::{LOGIN_TO_COMMENT, TITLE_TAKEN, redirect, redirect_with_flash};
use crate::middleware::{AppError, AppResult, CurrentUser, Flashes};
use crate::state::AppState;
use crate::views::Page;

fn post_not_found(post_id: PostId) -> AppError {
    AppError::NotFound(format!("Post {post_id} does not exist"))
}

fn post_url(post_id: PostId) -> String {
    format!("/post/{post_id}")
}

fn edit_url(post_id: PostId) -> String {
    format!("/edit-post/{post_id}")
}

/// GET /post/{post_id}
pub async fn show_post(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    post_page(
        &state,
        &current,
        &flashes,
        post_id,
        &CommentForm::default(),
        &FieldErrors::new(),
    )
    .await
}

/// POST /post/{post_id}
///
/// Anonymous visitors are sent to login. A stored comment redirects back to
/// the post, where it is listed last.
pub async fn add_comment(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    path: web::Path<PostId>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(post_not_found(post_id));
    }

    let Some(author) = current.user() else {
        return Ok(redirect_with_flash("/login", LOGIN_TO_COMMENT));
    };

    let form = form.into_inner();
    if let Err(errors) = validate_form(&form) {
        return post_page(&state, &current, &flashes, post_id, &form, &errors).await;
    }

    let new_comment = NewComment {
        text: form.comment,
        author_id: author.id,
        post_id,
    };
    match state.comments.create(new_comment).await {
        Ok(_) => Ok(redirect(&post_url(post_id))),
        // Deleted between the lookup and the insert.
        Err(RepoError::MissingReference("post")) => Err(post_not_found(post_id)),
        Err(e) => Err(e.into()),
    }
}

async fn post_page(
    state: &AppState,
    current: &CurrentUser,
    flashes: &Flashes,
    post_id: PostId,
    form: &CommentForm,
    errors: &FieldErrors,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;
    let comments = state.comments.list_for_post(post_id).await?;

    Page::new("post.html", current, flashes)
        .with("post", &post)
        .with("comments", &comments)
        .with("form", form)
        .with("errors", errors)
        .render(&state.views)
}

/// GET /new-post
pub async fn new_post_form(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
) -> AppResult<HttpResponse> {
    require_admin(current.user())?;

    post_form_page(
        &state,
        &current,
        &flashes,
        None,
        &PostForm::default(),
        &FieldErrors::new(),
    )
}

/// POST /new-post
pub async fn create_post(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let admin = require_admin(current.user())?;

    let form = form.into_inner();
    if let Err(errors) = validate_form(&form) {
        return post_form_page(&state, &current, &flashes, None, &form, &errors);
    }

    let new_post = NewPost::new(post_fields(form), admin.id, Utc::now().date_naive());
    match state.posts.create(new_post).await {
        Ok(_) => Ok(redirect("/")),
        Err(RepoError::DuplicateTitle) => Ok(redirect_with_flash("/new-post", TITLE_TAKEN)),
        Err(e) => Err(e.into()),
    }
}

/// GET /edit-post/{post_id}
pub async fn edit_post_form(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    require_admin(current.user())?;

    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))?;

    let fields = PostFields::from(&post.item);
    let form = PostForm {
        title: fields.title,
        subtitle: fields.subtitle,
        img_url: fields.img_url,
        body: fields.body,
    };
    post_form_page(
        &state,
        &current,
        &flashes,
        Some(post_id),
        &form,
        &FieldErrors::new(),
    )
}

/// POST /edit-post/{post_id}
///
/// The post keeps its date; the editor becomes its author.
pub async fn update_post(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    path: web::Path<PostId>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let admin = require_admin(current.user())?;
    let post_id = path.into_inner();

    let form = form.into_inner();
    if let Err(errors) = validate_form(&form) {
        if state.posts.find_by_id(post_id).await?.is_none() {
            return Err(post_not_found(post_id));
        }
        return post_form_page(&state, &current, &flashes, Some(post_id), &form, &errors);
    }

    match state.posts.update(post_id, post_fields(form), admin.id).await {
        Ok(_) => Ok(redirect(&post_url(post_id))),
        Err(RepoError::NotFound) => Err(post_not_found(post_id)),
        Err(RepoError::DuplicateTitle) => {
            Ok(redirect_with_flash(&edit_url(post_id), TITLE_TAKEN))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /delete/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    current: CurrentUser,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    require_admin(current.user())?;

    let post_id = path.into_inner();
    match state.posts.delete(post_id).await {
        Ok(()) => Ok(redirect("/")),
        Err(RepoError::NotFound) => Err(post_not_found(post_id)),
        Err(e) => Err(e.into()),
    }
}

fn post_fields(form: PostForm) -> PostFields {
    PostFields {
        title: form.title,
        subtitle: form.subtitle,
        body: form.body,
        img_url: form.img_url,
    }
}

/// Shared by create and edit; `editing` is the post being edited.
fn post_form_page(
    state: &AppState,
    current: &CurrentUser,
    flashes: &Flashes,
    editing: Option<PostId>,
    form: &PostForm,
    errors: &FieldErrors,
) -> AppResult<HttpResponse> {
    let action = match editing {
        Some(post_id) => edit_url(post_id),
        None => "/new-post".to_string(),
    };

    Page::new("make-post.html", current, flashes)
        .with("is_edit", &editing.is_some())
        .with("action", &action)
        .with("form", form)
        .with("errors", errors)
        .render(&state.views)
}
