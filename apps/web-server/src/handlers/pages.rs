//! Post listing and the static pages.

use actix_web::{HttpResponse, web};

use crate::middleware::{AppError, AppResult, CurrentUser, Flashes};
use crate::state::AppState;
use crate::views::Page;

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;

    Page::new("index.html", &current, &flashes)
        .with("posts", &posts)
        .render(&state.views)
}

/// GET /about
pub async fn about(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
) -> AppResult<HttpResponse> {
    Page::new("about.html", &current, &flashes).render(&state.views)
}

/// GET /contact
pub async fn contact(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
) -> AppResult<HttpResponse> {
    Page::new("contact.html", &current, &flashes).render(&state.views)
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("No such page".to_string()))
}
