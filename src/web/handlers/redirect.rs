//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::ALIAS_ALPHABET;

/// Longest alias the store can hold.
const MAX_ALIAS_LENGTH: usize = 32;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL.
///
/// Paths that cannot be an alias (wrong length or characters outside
/// `[A-Za-z0-9]`) are answered with 404 without touching the store.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist, and 500 if the stored URL
/// cannot be sent as a header value.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_alias_shaped(&alias) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "alias": alias }),
        ));
    }

    let original_url = state.link_service.get_original_url(&alias).await?;

    let location = HeaderValue::try_from(original_url).map_err(|e| {
        tracing::error!(alias = %alias, "Stored URL is not a valid header value: {}", e);
        AppError::internal("Short link is broken", json!({ "alias": alias }))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

fn is_alias_shaped(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LENGTH
        && alias.bytes().all(|b| ALIAS_ALPHABET.contains(&b))
}
