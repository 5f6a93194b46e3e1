//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Each persisted
//! entity has a companion `New*` struct describing what the caller supplies; the
//! store fills in surrogate ids and timestamps.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - An alias mapped to an original URL
//! - [`User`] - A registered account
//! - [`Session`] - An issued browser session

pub mod link;
pub mod session;
pub mod user;

pub use link::{NewShortLink, ShortLink};
pub use session::{NewSession, Session};
pub use user::{NewUser, User};
