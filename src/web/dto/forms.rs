//! Form bodies posted by the HTML pages.

use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::utils::password::MAX_PASSWORD_BYTES;
use crate::utils::url_check::validate_http_url;

/// Longest URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 2048;

/// `POST /shorten`
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[validate(
        length(min = 1, max = 2048, message = "URL must be between 1 and 2048 characters"),
        custom(function = "validate_http_url")
    )]
    pub url: String,
}

/// `POST /register`
///
/// The password needs at least 8 characters and at most 72 bytes of UTF-8, the
/// bcrypt input limit. A password of 72 characters outside ASCII is therefore
/// too long.
#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() <= MAX_PASSWORD_BYTES {
        return Ok(());
    }

    let mut err = ValidationError::new("password_bytes");
    err.message = Some(Cow::Borrowed("Password must be at most 72 bytes"));
    Err(err)
}

/// `POST /login`
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
