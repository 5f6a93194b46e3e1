//! Short link entity.

use chrono::{DateTime, Utc};

/// An alias and the original URL it redirects to.
///
/// Links are never mutated or deleted once created. The original URL is not
/// required to be unique; the same URL may be shortened any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub alias: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: i64, alias: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            alias,
            original_url,
            created_at,
        }
    }
}

/// Input data for reserving an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub alias: String,
    pub original_url: String,
}
