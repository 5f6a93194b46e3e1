//! Reading and writing the session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use crate::domain::entities::Session;

/// Name of the cookie holding the raw session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Raw session token carried by the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Builds the cookie handed out on login.
///
/// `Expires` matches the server-side session expiry, so the browser drops the
/// cookie at the moment the store stops honouring it.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .build();

    if let Some(expires) = to_offset_date_time(session.expires_at) {
        cookie.set_expires(expires);
    }

    cookie
}

/// Adds a removal cookie (empty value, expiry in the past) to the jar.
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

fn to_offset_date_time(at: DateTime<Utc>) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp()).ok()
}
