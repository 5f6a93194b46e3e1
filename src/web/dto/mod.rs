//! Form and response payloads for the web adapter.
//!
//! - [`forms`] - `application/x-www-form-urlencoded` bodies with validation
//! - [`health`] - health check response

pub mod forms;
pub mod health;
