//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    home_handler, login_handler, login_page, logout_handler, register_handler, register_page,
    shorten_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages that require a live session.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /` - Home page with the shorten form
/// - `POST /shorten` - Create a short link
/// - `POST /logout` - End the session
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/shorten", post(shorten_handler))
        .route("/logout", post(logout_handler))
}

/// Pages reachable without a session.
///
/// # Endpoints
///
/// - `GET /login`, `POST /login`
/// - `GET /register`, `POST /register`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_handler))
        .route("/register", get(register_page).post(register_handler))
}
