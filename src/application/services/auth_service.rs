//! Registration, credential checks and session lifecycle.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewSession, NewUser, Session, User};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_token;
use crate::utils::password::{
    MAX_COST, MAX_PASSWORD_BYTES, MIN_COST, hash_password, verify_password,
};
use bcrypt::BcryptError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Sessions live this long unless configured otherwise.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// bcrypt cost used unless configured otherwise.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashed once per service so unknown-email logins cost as much as real ones.
const DUMMY_PASSWORD: &str = "timing-equalizer";

/// Tunables for [`AuthService`].
#[derive(Clone)]
pub struct AuthSettings {
    /// HMAC key for session token hashes.
    pub signing_secret: String,
    pub session_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// Service for user registration and cookie session management.
///
/// Session tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the database
/// cannot turn stored rows into usable cookies without the server-side secret.
pub struct AuthService<A: ?Sized> {
    repository: Arc<A>,
    settings: AuthSettings,
    dummy_hash: String,
}

impl<A: AccountRepository + ?Sized> AuthService<A> {
    /// Creates a new authentication service.
    ///
    /// The bcrypt cost is clamped into the range bcrypt accepts.
    pub fn new(repository: Arc<A>, mut settings: AuthSettings) -> Self {
        settings.bcrypt_cost = settings.bcrypt_cost.clamp(MIN_COST, MAX_COST);
        let dummy_hash = dummy_hash(settings.bcrypt_cost);

        Self {
            repository,
            settings,
            dummy_hash,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.settings.session_ttl
    }

    /// Hashes a raw session token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.settings.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Registers a user with an already-computed password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Other store errors propagate unchanged.
    pub async fn register(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        let new_user = NewUser {
            email: email.clone(),
            password_hash: password_hash.to_string(),
        };

        match self.repository.insert_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(user)
            }
            Err(AppError::Conflict { .. }) => Err(AppError::conflict(
                "User already exists",
                json!({ "email": email }),
            )),
            Err(e) => Err(e),
        }
    }

    /// Hashes `password` with bcrypt on the blocking pool, then registers.
    ///
    /// # Errors
    ///
    /// See [`Self::register`]. Returns [`AppError::Validation`] if the password
    /// is longer than 72 bytes and [`AppError::Internal`] if hashing fails.
    pub async fn register_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let password = password.to_owned();
        let cost = self.settings.bcrypt_cost;

        let password_hash = run_blocking(move || hash_password(&password, cost))
            .await?
            .map_err(|e| match e {
                BcryptError::Truncation(len) => AppError::bad_request(
                    "Password must be at most 72 bytes",
                    json!({ "bytes": len, "max_bytes": MAX_PASSWORD_BYTES }),
                ),
                e => {
                    tracing::error!("Password hashing failed: {}", e);
                    AppError::internal("Failed to hash password", json!({}))
                }
            })?;

        self.register(email, &password_hash).await
    }

    /// Checks an email/password pair and returns the user id.
    ///
    /// Unknown email and wrong password produce the same error, and both paths
    /// run one bcrypt verification, so neither the response nor its timing
    /// reveals whether an email is registered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on any credential mismatch.
    /// Returns [`AppError::Internal`] on store failures or a corrupt stored hash.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<i64, AppError> {
        let email = normalize_email(email);
        let user = self.repository.find_user_by_email(&email).await?;

        let (user_id, stored_hash) = match user {
            Some(user) => (Some(user.id), user.password_hash),
            None => (None, self.dummy_hash.clone()),
        };

        let password = password.to_owned();
        let verified = run_blocking(move || verify_password(&password, &stored_hash)).await?;

        match (user_id, verified) {
            (Some(id), Ok(true)) => {
                tracing::info!(user_id = id, "User authenticated");
                Ok(id)
            }
            // Longer than any stored password can be, so it cannot match.
            (Some(_), Err(BcryptError::Truncation(_))) => Err(invalid_credentials()),
            (Some(id), Err(e)) => {
                tracing::error!(user_id = id, "Stored password hash is malformed: {}", e);
                Err(AppError::internal("Failed to verify credentials", json!({})))
            }
            _ => Err(invalid_credentials()),
        }
    }

    /// Issues a new session for `user_id`.
    ///
    /// The returned [`Session`] carries the raw token for the cookie; only its
    /// hash is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store or randomness failures.
    pub async fn create_session(&self, user_id: i64) -> Result<Session, AppError> {
        let token = generate_token().map_err(|e| {
            tracing::error!("Random number generator unavailable: {}", e);
            AppError::internal("Failed to create session", json!({}))
        })?;

        let expires_at = Utc::now() + self.settings.session_ttl;

        self.repository
            .insert_session(NewSession {
                token_hash: self.hash_token(&token),
                user_id,
                expires_at,
            })
            .await?;

        Ok(Session {
            token,
            user_id,
            expires_at,
        })
    }

    /// Resolves a session token to its user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown, revoked or expired.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn validate_session(&self, token: &str) -> Result<i64, AppError> {
        let token_hash = self.hash_token(token);

        self.repository
            .find_session_user(&token_hash, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Session not found or expired", json!({})))
    }

    /// Revokes a session. Revoking an unknown token is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_session(&self, token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(token);
        self.repository.delete_session(&token_hash).await
    }
}

/// bcrypt hash of [`DUMMY_PASSWORD`] at `cost`, verified against when the email is
/// unknown.
fn dummy_hash(cost: u32) -> String {
    hash_password(DUMMY_PASSWORD, cost)
        .or_else(|e| {
            tracing::warn!(cost, "Dummy hash at configured cost failed: {}", e);
            hash_password(DUMMY_PASSWORD, MIN_COST)
        })
        .unwrap_or_else(|e| {
            tracing::error!("Dummy hash unavailable, unknown-email logins will return early: {}", e);
            String::new()
        })
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}

/// Emails compare case-insensitively and without surrounding whitespace.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Runs CPU-bound work (bcrypt) off the async worker threads.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        AppError::internal("Internal error", json!({}))
    })
}
