//! Host extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Returns the `Host` header, port included, for building absolute short URLs.
///
/// Only characters valid in an authority (`host[:port]`, bracketed IPv6) are
/// accepted so the value can be embedded in a URL without escaping.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8 or characters outside an authority
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(extract_host_from_headers(&headers).unwrap(), "sho.rt:8080");
/// ```
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
        .trim();

    let valid = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'));

    if !valid {
        return Err(AppError::bad_request(
            "Invalid Host header",
            serde_json::json!({}),
        ));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn headers_with_host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_host_simple() {
        let result = extract_host_from_headers(&headers_with_host("example.com"));
        assert_eq!(result.unwrap(), "example.com");
    }

    #[test]
    fn test_extract_host_keeps_port() {
        let result = extract_host_from_headers(&headers_with_host("localhost:3000"));
        assert_eq!(result.unwrap(), "localhost:3000");
    }

    #[test]
    fn test_extract_host_ipv6_with_port() {
        let result = extract_host_from_headers(&headers_with_host("[::1]:8080"));
        assert_eq!(result.unwrap(), "[::1]:8080");
    }

    #[test]
    fn test_extract_host_missing_header() {
        let headers = HeaderMap::new();
        assert!(extract_host_from_headers(&headers).is_err());
    }

    #[test]
    fn test_extract_host_rejects_injection() {
        let result = extract_host_from_headers(&headers_with_host("evil.com/path?x=1"));
        assert!(result.is_err());

        let result = extract_host_from_headers(&headers_with_host("user@evil.com"));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_host_invalid_utf8() {
        let mut headers = HeaderMap::new();
        let invalid_bytes = vec![0xFF, 0xFE, 0xFD];
        if let Ok(header_value) = HeaderValue::from_bytes(&invalid_bytes) {
            headers.insert(header::HOST, header_value);

            let result = extract_host_from_headers(&headers);
            assert!(result.is_err());
        }
    }
}
