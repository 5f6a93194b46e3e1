#![allow(dead_code)]

use async_trait::async_trait;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;
use url_shortener::application::services::{AuthService, AuthSettings, LinkService};
use url_shortener::domain::entities::{NewSession, NewShortLink, NewUser, ShortLink, User};
use url_shortener::domain::repositories::{AccountRepository, LinkRepository};
use url_shortener::error::AppError;
use url_shortener::infrastructure::persistence::{InMemoryAccountRepository, InMemoryLinkRepository};
use url_shortener::routes::app_router;
use url_shortener::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://sho.rt";
pub const EMAIL: &str = "alice@example.com";
pub const PASSWORD: &str = "correct horse battery";

/// In-memory application wired the same way `server::run` wires the real one.
pub struct TestApp {
    pub links: Arc<InMemoryLinkRepository>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_session_ttl(Duration::hours(24))
    }

    pub fn with_session_ttl(session_ttl: Duration) -> Self {
        let links = Arc::new(InMemoryLinkRepository::new());
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let state = build_state(links.clone(), accounts.clone(), session_ttl);

        Self {
            links,
            accounts,
            state,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(app_router(self.state.clone(), StdDuration::from_secs(10))).unwrap()
    }

    /// Registers [`EMAIL`] / [`PASSWORD`] directly through the service.
    pub async fn register_default_user(&self) -> i64 {
        self.state
            .auth_service
            .register_with_password(EMAIL, PASSWORD)
            .await
            .unwrap()
            .id
    }
}

/// Wires services over arbitrary stores, for tests that swap one of them out.
pub fn build_state(
    links: Arc<dyn LinkRepository>,
    accounts: Arc<dyn AccountRepository>,
    session_ttl: Duration,
) -> AppState {
    let link_service = Arc::new(LinkService::new(links));
    let auth_service = Arc::new(AuthService::new(
        accounts,
        AuthSettings {
            signing_secret: TEST_SECRET.to_string(),
            session_ttl,
            bcrypt_cost: 4,
        },
    ));

    AppState::new(link_service, auth_service).with_public_base_url(Some(BASE_URL.to_string()))
}

/// Link store whose inserts never complete. Counts how many were started.
#[derive(Default)]
pub struct StalledLinkRepository {
    inserts: AtomicUsize,
}

impl StalledLinkRepository {
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkRepository for StalledLinkRepository {
    async fn insert_link(&self, _new_link: NewShortLink) -> Result<ShortLink, AppError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn find_by_alias(&self, _alias: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(None)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Account store whose session lookups fail. Everything else goes to memory.
#[derive(Default)]
pub struct BrokenSessionStore {
    inner: InMemoryAccountRepository,
}

#[async_trait]
impl AccountRepository for BrokenSessionStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, AppError> {
        self.inner.insert_user(new_user).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.inner.find_user_by_email(email).await
    }

    async fn insert_session(&self, new_session: NewSession) -> Result<(), AppError> {
        self.inner.insert_session(new_session).await
    }

    async fn find_session_user(
        &self,
        _token_hash: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        Err(AppError::internal("connection refused", json!({})))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), AppError> {
        self.inner.delete_session(token_hash).await
    }
}

/// Form body shared by `/login` and `/register`.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

pub fn credentials<'a>(email: &'a str, password: &'a str) -> Credentials<'a> {
    Credentials { email, password }
}

/// Logs in through the HTTP surface and returns the session cookie.
pub async fn login(server: &TestServer, email: &str, password: &str) -> Cookie<'static> {
    let response = server
        .post("/login")
        .form(&credentials(email, password))
        .await;

    assert_eq!(response.status_code(), 303);
    response.cookie("session_token")
}
