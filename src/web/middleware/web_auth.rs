//! Cookie-based authentication gate for the web pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::session_cookie::{clear_session_cookie, session_token};

/// Identity of the authenticated user, bound to a single request.
///
/// Inserted into request extensions by [`layer`]; handlers behind the gate read
/// it with `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
}

/// Lets a request through only if it carries a live session cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: session_token=<token>
/// ```
///
/// # Outcomes
///
/// - Live session: [`CurrentUser`] is attached and the handler runs
/// - No cookie: redirect to `/login`
/// - Unknown, revoked or expired token: cookie cleared, redirect to `/login`
/// - Store failure: error page (500), cookie left as is
///
/// Nothing is cached between requests; every gated request asks the store.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(home_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    let Some(token) = session_token(&jar) else {
        return Redirect::to("/login").into_response();
    };

    match st.auth_service.validate_session(&token).await {
        Ok(user_id) => {
            req.extensions_mut().insert(CurrentUser { user_id });
            next.run(req).await
        }
        Err(AppError::NotFound { .. }) => {
            tracing::debug!("Stale session cookie, redirecting to login");
            (clear_session_cookie(jar), Redirect::to("/login")).into_response()
        }
        Err(e) => e.into_response(),
    }
}
