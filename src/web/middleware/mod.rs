//! Middleware for the web adapter.
//!
//! - [`web_auth`] - session cookie gate for the authenticated pages
//! - [`tracing`] - request spans and response logging

pub mod tracing;
pub mod web_auth;

pub use web_auth::CurrentUser;
