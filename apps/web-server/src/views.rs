//! Tera template rendering.

use actix_web::HttpResponse;
use serde::Serialize;
use tera::{Context, Tera};

use quill_shared::ErrorPage;

use crate::middleware::flash::flash_removal_cookie;
use crate::middleware::{AppError, CurrentUser, Flashes};

const ERROR_TEMPLATE: &str = "error.html";

/// Loaded templates.
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Load every template matching `glob`, e.g. `templates/**/*.html`.
    pub fn new(glob: &str) -> Result<Self, tera::Error> {
        let tera = Tera::new(glob)?;
        tracing::debug!(
            templates = tera.get_template_names().count(),
            "Templates loaded"
        );
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(template, context)
    }

    /// Error pages carry no session data: they render even when identity
    /// resolution is what failed.
    pub fn render_error(&self, page: &ErrorPage) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("error", page);
        context.insert("current_user", &Option::<()>::None);
        context.insert("logged_in", &false);
        context.insert("is_admin", &false);
        context.insert("flashes", &Vec::<String>::new());
        self.tera.render(ERROR_TEMPLATE, &context)
    }
}

/// A page about to be rendered for the current visitor.
///
/// Every page sees `current_user`, `logged_in`, `is_admin` and `flashes`.
/// Rendering consumes the flashed messages.
pub struct Page {
    template: &'static str,
    context: Context,
    clear_flash: bool,
}

impl Page {
    pub fn new(template: &'static str, current: &CurrentUser, flashes: &Flashes) -> Self {
        let mut context = Context::new();
        context.insert("current_user", &current.user());
        context.insert("logged_in", &current.user().is_some());
        context.insert("is_admin", &current.is_admin());
        context.insert("flashes", flashes.messages());

        Self {
            template,
            context,
            clear_flash: !flashes.is_empty(),
        }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn render(self, views: &Views) -> Result<HttpResponse, AppError> {
        let body = views.render(self.template, &self.context)?;

        let mut response = HttpResponse::Ok();
        response.content_type("text/html; charset=utf-8");
        if self.clear_flash {
            response.cookie(flash_removal_cookie());
        }
        Ok(response.body(body))
    }
}
