//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers.
//! Neither service keeps state between calls; all coordination between
//! concurrent requests happens in the store.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Alias allocation and resolution
//! - [`services::auth_service::AuthService`] - Registration, login and sessions

pub mod services;
