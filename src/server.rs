//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, service wiring, and Axum server lifecycle.

use crate::application::services::{AuthService, AuthSettings, LinkPolicy, LinkService};
use crate::config::Config;
use crate::domain::repositories::{AccountRepository, LinkRepository};
use crate::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Link and auth services
/// - Axum HTTP server
///
/// The server stops accepting connections on Ctrl+C or `SIGTERM`, lets
/// in-flight requests finish, then closes the pool.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool_arc = Arc::new(pool.clone());
    let link_repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(pool_arc.clone()));
    let account_repository: Arc<dyn AccountRepository> =
        Arc::new(PgAccountRepository::new(pool_arc));

    let link_service = Arc::new(LinkService::with_policy(
        link_repository,
        LinkPolicy {
            alias_length: config.alias_length,
            max_attempts: config.alias_max_attempts,
        },
    ));

    let auth_service = Arc::new(AuthService::new(
        account_repository,
        AuthSettings {
            signing_secret: config.session_secret.clone(),
            session_ttl: chrono::Duration::hours(config.session_ttl_hours),
            bcrypt_cost: config.bcrypt_cost,
        },
    ));

    let state = AppState::new(link_service, auth_service)
        .with_public_base_url(config.public_base_url.clone())
        .with_secure_cookies(config.cookie_secure);

    let app = app_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves when the process receives Ctrl+C or, on Unix, `SIGTERM`.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
