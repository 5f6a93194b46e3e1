//! Login page and credential check.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::domain::entities::Session;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::forms::LoginForm;
use crate::web::session_cookie::session_cookie;

/// Template for the login page.
///
/// Renders `templates/login.html`; `error` is shown above the form after a
/// rejected attempt and `email` is echoed back into the input.
#[derive(Template, WebTemplate, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::default()
}

/// Checks credentials and opens a session.
///
/// # Endpoint
///
/// `POST /login` with form fields `email`, `password`
///
/// # Response
///
/// On success sets the `session_token` cookie and answers `303 See Other` to `/`.
///
/// # Errors
///
/// Re-renders the form with:
/// - 400 if a field is empty
/// - 401 if the email is unknown or the password is wrong (same message for both)
///
/// Store failures render the error page with 500.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match open_session(&state, &form).await {
        Ok(session) => {
            tracing::info!(user_id = session.user_id, "User logged in");
            let jar = jar.add(session_cookie(&session, state.secure_cookies));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(e @ (AppError::Validation { .. } | AppError::Unauthorized { .. })) => {
            tracing::info!("Login rejected: {}", e);
            let page = LoginTemplate {
                error: Some(e.to_string()),
                email: form.email.trim().to_string(),
            };
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => Err(e),
    }
}

async fn open_session(state: &AppState, form: &LoginForm) -> Result<Session, AppError> {
    form.validate()?;

    let user_id = state
        .auth_service
        .authenticate(&form.email, &form.password)
        .await?;

    state.auth_service.create_session(user_id).await
}
