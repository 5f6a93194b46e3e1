//! Logout handler.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::session_cookie::{clear_session_cookie, session_token};

/// Revokes the current session and clears the cookie.
///
/// # Endpoint
///
/// `POST /logout`
///
/// # Response
///
/// `303 See Other` to `/login`.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = session_token(&jar) {
        state.auth_service.delete_session(&token).await?;
    }

    tracing::info!("User logged out");

    Ok((clear_session_cookie(jar), Redirect::to("/login")))
}
