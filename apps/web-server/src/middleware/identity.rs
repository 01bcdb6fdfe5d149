//! Session cookie and the current-user extractor.

use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    web,
};
use futures::future::LocalBoxFuture;

use quill_core::domain::User;
use quill_core::identity::resolve_current_identity;

use super::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "quill_session";

/// The logged-in user, or `None` for anonymous requests.
///
/// Never rejects a request: a missing, forged, expired or ended session just
/// means anonymous. Only store faults fail extraction.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|u| u.is_admin)
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            let user = resolve_current_identity(
                state.sessions.as_ref(),
                state.users.as_ref(),
                token.as_deref(),
            )
            .await?;

            Ok(CurrentUser(user))
        })
    }
}

/// The raw session token sent with the request, if any.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Cookie handing a freshly started session to the browser.
pub fn session_cookie(token: String, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(ttl_seconds))
        .finish()
}

/// Cookie telling the browser to drop the session token.
pub fn session_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
