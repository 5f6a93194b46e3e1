//! Repository trait for users and their sessions.

use crate::domain::entities::{NewSession, NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage capability consumed by [`crate::application::services::AuthService`].
///
/// Session rows are addressed by the keyed hash of their token; raw tokens
/// never cross this boundary.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryAccountRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts a user; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Persists a session row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_session(&self, new_session: NewSession) -> Result<(), AppError>;

    /// Resolves a token hash to its user id, considering only rows whose expiry
    /// lies after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_session_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError>;

    /// Removes a session row. Removing an absent row succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError>;
}
