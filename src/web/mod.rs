//! Web layer for browser-based UI.
//!
//! Server-rendered pages (Askama templates) for registration, login and link
//! creation, plus the public redirect and health endpoints.
//!
//! # Modules
//!
//! - [`dto`] - Form and JSON payloads
//! - [`handlers`] - Request handlers
//! - [`middleware`] - Session gate and request tracing
//! - [`routes`] - Page route configuration
//! - [`session_cookie`] - Session cookie construction and removal

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session_cookie;
