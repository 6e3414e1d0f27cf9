//! Application state shared across handlers.

use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::WebConfig;
use crate::db::UserRepository;
use crate::services::identity::IdentityService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    pool: PgPool,
    identity: IdentityService<UserRepository>,
    cookie_key: Key,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cookie signing key is derived from `config.cookie_secret`, which
    /// [`WebConfig::from_env`] guarantees is at least 32 bytes long.
    #[must_use]
    pub fn new(config: WebConfig, pool: PgPool) -> Self {
        let cookie_key = Key::derive_from(config.cookie_secret.expose_secret().as_bytes());
        let identity = IdentityService::new(UserRepository::new(pool.clone()), config.admin_secret());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
                cookie_key,
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity service.
    #[must_use]
    pub fn identity(&self) -> &IdentityService<UserRepository> {
        &self.inner.identity
    }

    /// Get a reference to the cookie signing key.
    #[must_use]
    pub fn cookie_key(&self) -> &Key {
        &self.inner.cookie_key
    }
}
