//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage backed by PostgreSQL (SQLx)
//! - [`PgAccountRepository`] - Users and sessions backed by PostgreSQL (SQLx)
//! - [`InMemoryLinkRepository`], [`InMemoryAccountRepository`] - process-local
//!   stores with the same uniqueness guarantees

pub mod memory;
pub mod pg_account_repository;
pub mod pg_link_repository;

pub use memory::{InMemoryAccountRepository, InMemoryLinkRepository};
pub use pg_account_repository::PgAccountRepository;
pub use pg_link_repository::PgLinkRepository;
