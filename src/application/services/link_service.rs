//! Alias allocation and resolution service.

use std::sync::Arc;

use crate::domain::entities::NewShortLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_alias;
use serde_json::json;

/// Default number of symbols in a generated alias.
pub const DEFAULT_ALIAS_LENGTH: usize = 7;

/// Default number of insert attempts before giving up on collisions.
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Alias allocation policy.
///
/// With 62^7 possible aliases a collision is rare even for large tables; the
/// attempt bound turns a pathological collision streak into a deterministic
/// [`AppError::Exhausted`] instead of unbounded latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    pub alias_length: usize,
    pub max_attempts: usize,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service for creating and resolving short links.
///
/// Holds no state besides its repository handle and policy; alias uniqueness
/// is enforced entirely by the store's insert-if-absent semantics, so any number
/// of service instances (or processes) may allocate concurrently.
pub struct LinkService<L: ?Sized> {
    repository: Arc<L>,
    policy: LinkPolicy,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service with the default policy.
    pub fn new(repository: Arc<L>) -> Self {
        Self::with_policy(repository, LinkPolicy::default())
    }

    /// Creates a new link service with an explicit policy.
    pub fn with_policy(repository: Arc<L>, policy: LinkPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Reserves a fresh alias for `original_url` and returns it.
    ///
    /// # Allocation loop
    ///
    /// Up to `max_attempts` times, strictly one after another:
    ///
    /// 1. generate a random candidate of `alias_length` symbols
    /// 2. insert it; the store rejects the insert if the alias is taken
    /// 3. on success return the alias
    /// 4. on [`AppError::Conflict`] discard the candidate and retry
    /// 5. on any other error stop and return it
    ///
    /// There is no lookup before the insert. A check-then-insert would race
    /// with concurrent writers; the unique constraint alone decides.
    ///
    /// Dropping the returned future (client gone, request timeout) abandons the
    /// in-flight insert and no further attempts are made.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is blank.
    /// Returns [`AppError::Exhausted`] if every attempt collided.
    /// Returns [`AppError::Internal`] on store or randomness failures.
    pub async fn create_short_url(&self, original_url: &str) -> Result<String, AppError> {
        if original_url.trim().is_empty() {
            return Err(AppError::bad_request("URL is required", json!({})));
        }

        for attempt in 1..=self.policy.max_attempts {
            let alias = generate_alias(self.policy.alias_length).map_err(|e| {
                tracing::error!("Random number generator unavailable: {}", e);
                AppError::internal("Failed to generate alias", json!({}))
            })?;

            let new_link = NewShortLink {
                alias,
                original_url: original_url.to_string(),
            };

            match self.repository.insert_link(new_link).await {
                Ok(link) => {
                    tracing::info!(alias = %link.alias, attempt, "Short link created");
                    return Ok(link.alias);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "Alias collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = self.policy.max_attempts,
            "Alias space exhausted for this request"
        );

        Err(AppError::Exhausted {
            attempts: self.policy.max_attempts,
        })
    }

    /// Resolves an alias to the URL it was created for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this alias.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_original_url(&self, alias: &str) -> Result<String, AppError> {
        match self.repository.find_by_alias(alias).await? {
            Some(link) => Ok(link.original_url),
            None => {
                tracing::debug!(alias, "Alias not found");
                Err(AppError::not_found(
                    "Short link not found",
                    json!({ "alias": alias }),
                ))
            }
        }
    }

    /// Round-trips to the link store.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Joins a public base URL and an alias into the full short URL.
pub fn short_url(base_url: &str, alias: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLink;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::ALIAS_ALPHABET;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stored(new_link: NewShortLink) -> ShortLink {
        ShortLink::new(1, new_link.alias, new_link.original_url, Utc::now())
    }

    fn conflict() -> AppError {
        AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": "links_alias_key" }),
        )
    }

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert_link()
            .withf(|new_link| new_link.original_url == "https://example.com")
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(Arc::new(mock_repo));

        let alias = service
            .create_short_url("https://example.com")
            .await
            .unwrap();

        assert_eq!(alias.len(), DEFAULT_ALIAS_LENGTH);
        assert!(alias.bytes().all(|b| ALIAS_ALPHABET.contains(&b)));
    }

    #[tokio::test]
    async fn test_create_short_url_respects_policy_length() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert_link()
            .withf(|new_link| new_link.alias.len() == 12)
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::with_policy(
            Arc::new(mock_repo),
            LinkPolicy {
                alias_length: 12,
                max_attempts: 3,
            },
        );

        let alias = service.create_short_url("https://example.com").await.unwrap();
        assert_eq!(alias.len(), 12);
    }

    #[tokio::test]
    async fn test_create_short_url_retries_until_last_attempt() {
        let mut mock_repo = MockLinkRepository::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let candidates = Arc::new(Mutex::new(Vec::new()));

        let calls_in_mock = calls.clone();
        let candidates_in_mock = candidates.clone();
        mock_repo
            .expect_insert_link()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(move |new_link| {
                candidates_in_mock
                    .lock()
                    .unwrap()
                    .push(new_link.alias.clone());

                let n = calls_in_mock.fetch_add(1, Ordering::SeqCst);
                if n + 1 < DEFAULT_MAX_ATTEMPTS {
                    Err(conflict())
                } else {
                    Ok(stored(new_link))
                }
            });

        let service = LinkService::new(Arc::new(mock_repo));

        let alias = service
            .create_short_url("https://example.com")
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), DEFAULT_MAX_ATTEMPTS);

        let candidates = candidates.lock().unwrap();
        assert_eq!(candidates.last(), Some(&alias));

        let distinct: HashSet<&String> = candidates.iter().collect();
        assert_eq!(distinct.len(), DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_create_short_url_exhaustion() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert_link()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_| Err(conflict()));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_short_url("https://example.com").await;

        match result {
            Err(AppError::Exhausted { attempts }) => assert_eq!(attempts, DEFAULT_MAX_ATTEMPTS),
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_short_url_aborts_on_store_error() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert_link()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_short_url("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_short_url_rejects_blank_input() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_insert_link().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_short_url("   ").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_short_url_allows_duplicate_urls() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert_link()
            .times(2)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(Arc::new(mock_repo));

        let first = service.create_short_url("https://example.com").await.unwrap();
        let second = service.create_short_url("https://example.com").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_get_original_url_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_alias()
            .withf(|alias| alias == "aB3dE9x")
            .times(1)
            .returning(|alias| {
                Ok(Some(ShortLink::new(
                    3,
                    alias.to_string(),
                    "https://rust-lang.org".to_string(),
                    Utc::now(),
                )))
            });

        let service = LinkService::new(Arc::new(mock_repo));

        let url = service.get_original_url("aB3dE9x").await.unwrap();
        assert_eq!(url, "https://rust-lang.org");
    }

    #[tokio::test]
    async fn test_get_original_url_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_alias()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get_original_url("doesnotexist").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_short_url_joins_base_and_alias() {
        assert_eq!(
            short_url("http://localhost:3000/", "abc1234"),
            "http://localhost:3000/abc1234"
        );
        assert_eq!(
            short_url("https://sho.rt", "abc1234"),
            "https://sho.rt/abc1234"
        );
    }
}
