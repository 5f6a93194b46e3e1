//! Utility functions for code generation, password hashing, and request handling.
//!
//! - [`code_generator`] - Alias and session token generation
//! - [`password`] - bcrypt hashing and verification
//! - [`url_check`] - Validation of URLs submitted for shortening
//! - [`extract_host`] - Host extraction from HTTP headers

pub mod code_generator;
pub mod extract_host;
pub mod password;
pub mod url_check;
