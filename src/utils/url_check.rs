//! Checks applied to URLs submitted for shortening.
//!
//! The original URL is stored as submitted, minus surrounding whitespace. These
//! checks only reject input that could never be a sensible redirect target, or
//! that could not be sent back in a `Location` header unchanged.

use std::borrow::Cow;
use url::Url;
use validator::ValidationError;

/// Reasons a submitted URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlCheckError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Accepts absolute `http`/`https` URLs with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes that would turn the
/// redirect endpoint into an injection vector. Control characters (tab, CR, LF
/// and the rest of C0/C1) are refused anywhere inside the trimmed input.
///
/// # Errors
///
/// See [`UrlCheckError`].
pub fn check_http_url(input: &str) -> Result<(), UrlCheckError> {
    let input = input.trim();

    // The parser silently drops tabs and newlines, but the raw string is what
    // gets stored and later sent as a header value.
    if input.chars().any(char::is_control) {
        return Err(UrlCheckError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlCheckError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlCheckError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlCheckError::MissingHost),
    }
}

/// [`check_http_url`] in the shape `validator` expects for custom field checks.
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    check_http_url(value).map_err(|e| {
        let mut err = ValidationError::new("http_url");
        err.message = Some(Cow::Owned(e.to_string()));
        err
    })
}
