//! Registration, login and logout.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use quill_core::accounts::{self, LoginError, Registration};
use quill_core::domain::User;
use quill_core::error::DomainError;
use quill_shared::{FieldErrors, LoginForm, RegisterForm, validate_form};

use crate::middleware::flash::{EMAIL_TAKEN, EMAIL_UNKNOWN, WRONG_PASSWORD, redirect_with_flash};
use crate::middleware::identity::{session_cookie, session_removal_cookie, session_token};
use crate::middleware::{AppResult, CurrentUser, Flashes};
use crate::state::AppState;
use crate::views::Page;

/// GET /register
pub async fn register_form(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
) -> AppResult<HttpResponse> {
    register_page(&state, &current, &flashes, &RegisterForm::default(), &FieldErrors::new())
}

/// POST /register
///
/// A taken email sends the visitor to the login page; success logs the new
/// account in.
pub async fn register(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let mut form = form.into_inner();
    if let Err(errors) = validate_form(&form) {
        form.password.clear();
        return register_page(&state, &current, &flashes, &form, &errors);
    }

    let registration = Registration {
        email: form.email,
        name: form.name,
        password: form.password,
    };
    let result = accounts::register(
        state.users.as_ref(),
        state.passwords.as_ref(),
        &state.admin_policy,
        registration,
    )
    .await;

    match result {
        Ok(user) => start_session(&state, &user, "/"),
        Err(DomainError::Duplicate(_)) => Ok(redirect_with_flash("/login", EMAIL_TAKEN)),
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
) -> AppResult<HttpResponse> {
    login_page(&state, &current, &flashes, &LoginForm::default(), &FieldErrors::new())
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    current: CurrentUser,
    flashes: Flashes,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let mut form = form.into_inner();
    if let Err(errors) = validate_form(&form) {
        form.password.clear();
        return login_page(&state, &current, &flashes, &form, &errors);
    }

    let result = accounts::authenticate(
        state.users.as_ref(),
        state.passwords.as_ref(),
        &form.email,
        &form.password,
    )
    .await;

    match result {
        Ok(user) => start_session(&state, &user, "/"),
        Err(LoginError::UnknownEmail) => Ok(redirect_with_flash("/register", EMAIL_UNKNOWN)),
        Err(LoginError::WrongPassword) => Ok(redirect_with_flash("/login", WRONG_PASSWORD)),
        Err(LoginError::Repo(e)) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    if let Some(token) = session_token(&req) {
        // The cookie goes away regardless; a failed revocation only matters
        // to whoever still holds a copy of the token.
        if let Err(e) = state.sessions.end(&token).await {
            tracing::warn!(error = %e, "Failed to end session");
        }
    }

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_removal_cookie())
        .finish())
}

fn start_session(state: &AppState, user: &User, location: &str) -> AppResult<HttpResponse> {
    let session = state.sessions.start(user.id)?;
    tracing::info!(user_id = user.id, "Session started");

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(session_cookie(
            session.token,
            state.sessions.ttl_seconds(),
            state.cookie_secure,
        ))
        .finish())
}

fn register_page(
    state: &AppState,
    current: &CurrentUser,
    flashes: &Flashes,
    form: &RegisterForm,
    errors: &FieldErrors,
) -> AppResult<HttpResponse> {
    Page::new("register.html", current, flashes)
        .with("form", form)
        .with("errors", errors)
        .render(&state.views)
}

fn login_page(
    state: &AppState,
    current: &CurrentUser,
    flashes: &Flashes,
    form: &LoginForm,
    errors: &FieldErrors,
) -> AppResult<HttpResponse> {
    Page::new("login.html", current, flashes)
        .with("form", form)
        .with("errors", errors)
        .render(&state.views)
}
