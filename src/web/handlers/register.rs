//! Registration page and account creation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::forms::RegisterForm;

/// Template for the registration page.
#[derive(Template, WebTemplate, Default)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Renders the registration page.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::default()
}

/// Creates an account and sends the browser to the login page.
///
/// # Endpoint
///
/// `POST /register` with form fields `email`, `password`
///
/// Registration does not log the user in.
///
/// # Errors
///
/// Re-renders the form with 400 if the email is malformed, the password is
/// shorter than 8 characters or longer than 72 bytes, or the email is already
/// registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(()) => state
            .auth_service
            .register_with_password(&form.email, &form.password)
            .await
            .map(|_| ()),
        Err(errors) => Err(errors.into()),
    };

    match result {
        Ok(()) => Ok(Redirect::to("/login").into_response()),
        Err(e @ (AppError::Validation { .. } | AppError::Conflict { .. })) => {
            let page = RegisterTemplate {
                error: Some(e.to_string()),
                email: form.email.trim().to_string(),
            };
            Ok((e.status_code(), page).into_response())
        }
        Err(e) => Err(e),
    }
}
