//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::Query, response::IntoResponse};
use serde::Deserialize;

use crate::web::middleware::CurrentUser;

/// Template for the home page.
///
/// Renders `templates/home.html` with the shorten form and, after a successful
/// submission, the short URL that was just created.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub short: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub short: Option<String>,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /?short=<short url>`
///
/// # Authentication
///
/// Behind the session gate.
pub async fn home_handler(
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    tracing::debug!(user_id = user.user_id, "Rendering home page");

    HomeTemplate {
        short: query.short.filter(|s| !s.is_empty()),
    }
}
