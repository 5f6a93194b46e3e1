//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::repositories::{AccountRepository, LinkRepository};

/// Handles to the services behind the web adapter.
///
/// Cheap to clone; every field is either `Arc`-backed or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService<dyn AccountRepository>>,
    /// Base for short URLs shown to users. `None` means derive it from `Host`.
    pub public_base_url: Option<String>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<dyn LinkRepository>>,
        auth_service: Arc<AuthService<dyn AccountRepository>>,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            public_base_url: None,
            secure_cookies: false,
        }
    }

    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.public_base_url = base;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }
}
