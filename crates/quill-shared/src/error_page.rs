//! Payload of the HTML error page, modelled on RFC 7807 problem details.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPage {
    /// The HTTP status code.
    pub status: u16,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request ID for debugging purposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorPage {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: None,
            request_id: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }

    /// Minimal self-contained HTML, for when templates are unavailable.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<!DOCTYPE html><html><head><title>{status} {title}</title></head><body><h1>{status} {title}</h1>",
            status = self.status,
            title = escape(&self.title),
        );
        if let Some(detail) = &self.detail {
            html.push_str(&format!("<p>{}</p>", escape(detail)));
        }
        if let Some(request_id) = &self.request_id {
            html.push_str(&format!("<p><small>Request ID: {}</small></p>", escape(request_id)));
        }
        html.push_str("<p><a href=\"/\">Back to all posts</a></p></body></html>");
        html
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_escaped() {
        let html = ErrorPage::not_found("post <42>")
            .with_request_id("req-1")
            .to_html();

        assert!(html.contains("404 Not Found"));
        assert!(html.contains("post &lt;42&gt;"));
        assert!(html.contains("req-1"));
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let json = serde_json::to_value(ErrorPage::internal_error()).unwrap();
        assert_eq!(json, serde_json::json!({"status": 500, "title": "Internal Server Error"}));
    }
}
