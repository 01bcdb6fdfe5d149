//! Submitted HTML forms.
//!
//! Every field defaults to the empty string, so a missing field fails
//! validation like an empty one instead of rejecting the request outright.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter a password."))]
    pub password: String,
    #[validate(length(min = 1, message = "Please enter your name."))]
    pub name: String,
}

/// Login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password."))]
    pub password: String,
}

/// Comment form shown under a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Comment cannot be empty."))]
    pub comment: String,
}

/// Create/edit post form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Please enter a title."))]
    pub title: String,
    #[validate(length(min = 1, message = "Please enter a subtitle."))]
    pub subtitle: String,
    #[validate(url(message = "Please enter a valid image URL."))]
    pub img_url: String,
    #[validate(length(min = 1, message = "Please write some content."))]
    pub body: String,
}

/// Per-field error messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Run a form's rules. On failure, returns the messages to show next to each
/// field when the form is re-rendered.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(|errors| {
        errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid {field}."),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect()
    })
}
