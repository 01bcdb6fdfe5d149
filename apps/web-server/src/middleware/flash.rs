//! One-shot messages carried across a redirect.
//!
//! The messages travel in the `_flash` cookie as a base64url-encoded JSON
//! array. The next page that renders them also clears the cookie.

use std::future::{Ready, ready};

use actix_web::{
    FromRequest, HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite},
    dev::Payload,
    http::header,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

pub const FLASH_COOKIE: &str = "_flash";

pub const EMAIL_TAKEN: &str = "That email has already been registered. Please login.";
pub const EMAIL_UNKNOWN: &str = "That email is not yet registered. Please register first.";
pub const WRONG_PASSWORD: &str = "That password is incorrect. Please try again.";
pub const LOGIN_TO_COMMENT: &str = "You need to login or register to comment.";
pub const TITLE_TAKEN: &str = "A post with that title already exists.";

/// Messages flashed by the previous response.
#[derive(Debug, Clone, Default)]
pub struct Flashes(pub Vec<String>);

impl Flashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl FromRequest for Flashes {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let messages = req
            .cookie(FLASH_COOKIE)
            .map(|c| decode(c.value()))
            .unwrap_or_default();

        ready(Ok(Flashes(messages)))
    }
}

/// Undecodable cookies are dropped silently.
fn decode(value: &str) -> Vec<String> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn encode(messages: &[&str]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_else(|_| b"[]".to_vec());
    URL_SAFE_NO_PAD.encode(json)
}

fn flash_cookie(messages: &[&str]) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, encode(messages))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie clearing consumed messages.
pub fn flash_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Plain `302 Found` redirect.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Redirect that shows `message` on the next rendered page.
pub fn redirect_with_flash(location: &str, message: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(flash_cookie(&[message]))
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn test_flash_survives_the_redirect() {
        let res = redirect_with_flash("/login", WRONG_PASSWORD);
        let cookie = res
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .unwrap()
            .into_owned();

        let req = TestRequest::default().cookie(cookie).to_http_request();
        let flashes = Flashes::extract(&req).await.unwrap();

        assert_eq!(flashes.messages(), [WRONG_PASSWORD]);
    }

    #[actix_web::test]
    async fn test_garbage_cookie_means_no_messages() {
        let req = TestRequest::default()
            .cookie(Cookie::new(FLASH_COOKIE, "%%%not-base64"))
            .to_http_request();

        let flashes = Flashes::extract(&req).await.unwrap();

        assert!(flashes.is_empty());
    }

    #[test]
    fn test_redirect_location() {
        let res = redirect("/post/3");

        assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/post/3");
    }
}
