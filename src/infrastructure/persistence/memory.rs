//! In-process implementations of the repository traits.
//!
//! Used by the test suites and handy for local experiments without PostgreSQL.
//! Insert-if-absent is atomic through `DashMap::entry`, so the uniqueness
//! guarantees match the SQL constraints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewSession, NewShortLink, NewUser, ShortLink, User};
use crate::domain::repositories::{AccountRepository, LinkRepository};
use crate::error::AppError;

/// Links keyed by alias.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, ShortLink>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_link(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        match self.links.entry(new_link.alias) {
            Entry::Occupied(entry) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_alias_key", "alias": entry.key() }),
            )),
            Entry::Vacant(entry) => {
                let link = ShortLink::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    entry.key().clone(),
                    new_link.original_url,
                    Utc::now(),
                );
                entry.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(alias).map(|link| link.value().clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

/// Users keyed by email and sessions keyed by token hash.
#[derive(Debug)]
pub struct InMemoryAccountRepository {
    users: DashMap<String, User>,
    sessions: DashMap<String, SessionEntry>,
    next_user_id: AtomicI64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            sessions: DashMap::new(),
            next_user_id: AtomicI64::new(1),
        }
    }

    /// Number of session rows, expired ones included.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, AppError> {
        match self.users.entry(new_user.email) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            )),
            Entry::Vacant(entry) => {
                let user = User {
                    id: self.next_user_id.fetch_add(1, Ordering::Relaxed),
                    email: entry.key().clone(),
                    password_hash: new_user.password_hash,
                    created_at: Utc::now(),
                };
                entry.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(email).map(|user| user.value().clone()))
    }

    async fn insert_session(&self, new_session: NewSession) -> Result<(), AppError> {
        self.sessions.insert(
            new_session.token_hash,
            SessionEntry {
                user_id: new_session.user_id,
                expires_at: new_session.expires_at,
            },
        );
        Ok(())
    }

    async fn find_session_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        Ok(self
            .sessions
            .get(token_hash)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.user_id))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        self.sessions.remove(token_hash);
        Ok(())
    }
}
