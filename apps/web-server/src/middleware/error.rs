//! Error handling: the handler error type and the HTML error pages.

use actix_web::{
    HttpMessage, HttpResponse, ResponseError,
    dev::ServiceResponse,
    http::{StatusCode, header},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web,
};

use quill_core::error::{DomainError, RepoError};
use quill_core::guard::Unauthorized;
use quill_core::ports::AuthError;
use quill_shared::ErrorPage;

use crate::observability::RequestId;
use crate::state::AppState;

/// Application-level error type returned by handlers.
///
/// Duplicate resources and failed logins never get here: handlers turn them
/// into a flash message and a redirect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Admin-only route hit by anyone else. Answered with a plain redirect
    /// to the login page, without a message.
    #[error("Login required")]
    LoginRequired,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text that is safe to show on the error page.
    fn public_detail(&self) -> Option<&str> {
        match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) => Some(detail),
            AppError::LoginRequired | AppError::Internal(_) => None,
        }
    }

    fn page(&self) -> ErrorPage {
        let status = self.status_code();
        let page = ErrorPage::new(status.as_u16(), status.canonical_reason().unwrap_or("Error"));
        match self.public_detail() {
            Some(detail) => page.with_detail(detail),
            None => page,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LoginRequired => StatusCode::FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::LoginRequired => HttpResponse::Found()
                .insert_header((header::LOCATION, "/login"))
                .finish(),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                html_response(self.status_code(), self.page().to_html())
            }
            _ => html_response(self.status_code(), self.page().to_html()),
        }
    }
}

fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::MissingReference(entity) => AppError::NotFound(format!("No such {entity}")),
            RepoError::DuplicateEmail => {
                AppError::BadRequest("That email has already been registered".to_string())
            }
            RepoError::DuplicateTitle => {
                AppError::BadRequest("A post with that title already exists".to_string())
            }
            RepoError::Connection(msg) | RepoError::Query(msg) => {
                AppError::Internal(format!("Database error: {msg}"))
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{entity_type} {id} not found"))
            }
            DomainError::Duplicate(field) => {
                AppError::BadRequest(format!("That {field} is already taken"))
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<Unauthorized> for AppError {
    fn from(_: Unauthorized) -> Self {
        AppError::LoginRequired
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(format!("Template error: {err:?}"))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Replace the body of every 4xx/5xx HTML response with the themed error
/// page, including the request ID. JSON responses are left alone.
pub fn error_pages<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .default_handler_client(render_error_page)
        .default_handler_server(render_error_page)
}

fn render_error_page<B: 'static>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let mut page = match res.response().error().and_then(|e| e.as_error::<AppError>()) {
        Some(err) => err.page(),
        None => ErrorPage::new(status.as_u16(), status.canonical_reason().unwrap_or("Error")),
    };
    if let Some(request_id) = res.request().extensions().get::<RequestId>() {
        page = page.with_request_id(request_id.as_str());
    }

    let body = res
        .request()
        .app_data::<web::Data<AppState>>()
        .and_then(|state| match state.views.render_error(&page) {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::error!(error = ?e, "Failed to render error page");
                None
            }
        })
        .unwrap_or_else(|| page.to_html());

    let (req, res) = res.into_parts();
    let mut res = res.set_body(body);
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );
    let res = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();

    Ok(ErrorHandlerResponse::Response(res))
}
