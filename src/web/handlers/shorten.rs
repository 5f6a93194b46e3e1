//! Handler for the shorten form.

use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use url::form_urlencoded;
use validator::Validate;

use crate::application::services::link_service::short_url;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::extract_host_from_headers;
use crate::web::dto::forms::ShortenForm;
use crate::web::middleware::CurrentUser;

/// Creates a short link and sends the browser back to the home page with it.
///
/// # Endpoint
///
/// `POST /shorten` with form field `url`
///
/// # Response
///
/// `303 See Other` to `/?short=<percent-encoded short url>`.
///
/// The short URL is built from `PUBLIC_BASE_URL` when configured, otherwise
/// from the request's `Host` header.
///
/// # Errors
///
/// - 400 if the URL is empty, too long, or not an absolute http(s) URL
/// - 500 if no free alias was found within the attempt bound or the store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;

    let base_url = match state.public_base_url {
        Some(ref base) => base.clone(),
        None => format!("http://{}", extract_host_from_headers(&headers)?),
    };

    let alias = state.link_service.create_short_url(form.url.trim()).await?;
    tracing::info!(user_id = user.user_id, alias = %alias, "Link shortened");

    let short = short_url(&base_url, &alias);
    let escaped: String = form_urlencoded::byte_serialize(short.as_bytes()).collect();

    Ok(Redirect::to(&format!("/?short={escaped}")))
}
