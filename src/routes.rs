//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Home page (session required)
//! - `POST /shorten`           - Create a short link (session required)
//! - `POST /logout`            - End the session (session required)
//! - `GET|POST /login`         - Login (public)
//! - `GET|POST /register`      - Registration (public)
//! - `GET  /{alias}`           - Short link redirect (public)
//! - `GET  /health`            - Health check (public)
//! - `/static/*`               - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding the configured limit are dropped with 408
//! - **Authentication** - Cookie session gate on the protected pages

use crate::state::AppState;
use crate::web;
use crate::web::handlers::{health_handler, redirect_handler};
use crate::web::middleware::{tracing, web_auth};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound for a single request; when it elapses the
///   handler future is dropped, abandoning any in-flight store call
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let protected = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));

    Router::new()
        .merge(protected)
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(tracing::layer())
}
