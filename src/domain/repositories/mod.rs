//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. Each service depends on exactly
//! one narrow capability:
//!
//! - [`LinkRepository`] - alias reservation and lookup
//! - [`AccountRepository`] - users and sessions
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Error contract
//!
//! Uniqueness violations surface as [`crate::error::AppError::Conflict`], every
//! other store failure as [`crate::error::AppError::Internal`]. Lookups report
//! absence as `Ok(None)`.

pub mod account_repository;
pub mod link_repository;

pub use account_repository::AccountRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
