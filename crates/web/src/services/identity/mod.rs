//! Request identity service.
//!
//! Reads who the caller is from signed cookies:
//!
//! - [`read_user_id`] - user ID from the `auth` cookie
//! - [`load_user`] - the user record for the context's resolved ID
//! - [`admin_status`] - `admin` cookie checked against the admin auth key
//! - [`login_url`] - login redirect that returns to the current page
//!
//! Signature verification happens before any of this, in the
//! [`RequestContext`] implementation. Values handed over here are trusted.

mod context;
mod error;
mod secret;

pub use context::RequestContext;
pub use error::IdentityError;
pub use secret::{AdminSecret, SecretMatcher};

use gitfund_core::{ADMIN_COOKIE, AUTH_COOKIE, LOGIN_PATH, RETURN_TO_PARAM, UserId};

use crate::db::{RepositoryError, UserStore};
use crate::models::User;

/// Read the user ID from the signed `auth` cookie.
///
/// Returns `Ok(None)` when the cookie is absent or empty.
///
/// # Errors
///
/// Returns `IdentityError::MalformedAuthCookie` if the cookie is present but
/// is not a base-10 integer. Callers should treat this as an integrity failure
/// rather than as a logged-out user.
pub fn read_user_id(ctx: &impl RequestContext) -> Result<Option<UserId>, IdentityError> {
    let Some(raw) = ctx.signed_cookie(AUTH_COOKIE).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    Ok(Some(raw.parse()?))
}

/// Load the user for the context's resolved user ID.
///
/// The store is not queried when the context has no user ID.
///
/// # Errors
///
/// Returns `RepositoryError` if the store lookup fails. A user missing from
/// the store is `Ok(None)`.
pub async fn load_user<S: UserStore>(
    ctx: &impl RequestContext,
    store: &S,
) -> Result<Option<User>, RepositoryError> {
    let Some(user_id) = ctx.user_id() else {
        return Ok(None);
    };

    let user = store.get_by_id(user_id).await?;
    if user.is_none() {
        tracing::debug!(user_id = %user_id, "auth cookie refers to unknown user");
    }
    Ok(user)
}

/// Check the signed `admin` cookie against the admin auth key.
///
/// An absent or empty cookie returns `false` without running the comparison.
#[must_use]
pub fn admin_status(ctx: &impl RequestContext, secret: &impl SecretMatcher) -> bool {
    match ctx.signed_cookie(ADMIN_COOKIE) {
        Some(key) if !key.is_empty() => secret.matches(&key),
        _ => false,
    }
}

/// Build the login URL that sends the user back to the current page.
///
/// The context name is appended as-is, without percent-encoding.
#[must_use]
pub fn login_url(ctx: &impl RequestContext) -> String {
    format!("{LOGIN_PATH}?{RETURN_TO_PARAM}={}", ctx.name())
}

/// Identity service bound to a user store and the admin auth key.
///
/// Both dependencies are supplied at construction, so tests and alternative
/// deployments can run with any store and any secret.
#[derive(Debug, Clone)]
pub struct IdentityService<S> {
    store: S,
    admin_secret: AdminSecret,
}

impl<S: UserStore> IdentityService<S> {
    /// Create a new identity service.
    #[must_use]
    pub const fn new(store: S, admin_secret: AdminSecret) -> Self {
        Self {
            store,
            admin_secret,
        }
    }

    /// The backing user store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// See [`load_user`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store lookup fails.
    pub async fn load_user(
        &self,
        ctx: &impl RequestContext,
    ) -> Result<Option<User>, RepositoryError> {
        load_user(ctx, &self.store).await
    }

    /// See [`admin_status`].
    #[must_use]
    pub fn admin_status(&self, ctx: &impl RequestContext) -> bool {
        admin_status(ctx, &self.admin_secret)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use secrecy::SecretString;

    use super::*;

    #[derive(Default)]
    struct StubContext {
        cookies: HashMap<&'static str, &'static str>,
        user_id: Option<UserId>,
        name: &'static str,
    }

    impl StubContext {
        fn with_cookie(name: &'static str, value: &'static str) -> Self {
            Self {
                cookies: HashMap::from([(name, value)]),
                ..Self::default()
            }
        }
    }

    impl RequestContext for StubContext {
        fn signed_cookie(&self, name: &str) -> Option<String> {
            self.cookies.get(name).map(|v| (*v).to_owned())
        }

        fn user_id(&self) -> Option<UserId> {
            self.user_id
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        users: HashMap<UserId, User>,
        calls: AtomicUsize,
    }

    impl MemoryStore {
        fn with_user(id: i64) -> Self {
            let user = sample_user(id);
            Self {
                users: HashMap::from([(user.id, user)]),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl UserStore for MemoryStore {
        async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.users.get(&id).cloned())
        }
    }

    struct FailingStore;

    impl UserStore for FailingStore {
        async fn get_by_id(&self, _id: UserId) -> Result<Option<User>, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    /// Records whether the comparison ran.
    struct CountingMatcher {
        secret: &'static str,
        calls: Cell<usize>,
    }

    impl SecretMatcher for CountingMatcher {
        fn matches(&self, candidate: &str) -> bool {
            self.calls.set(self.calls.get() + 1);
            candidate == self.secret
        }
    }

    fn sample_user(id: i64) -> User {
        User {
            id: UserId::new(id),
            login: format!("user{id}"),
            email: None,
            created_at: Utc::now(),
        }
    }

    fn admin_secret() -> AdminSecret {
        AdminSecret::new(SecretString::from("s3cr3t-Adm1n-K3y"))
    }

    // =========================================================================
    // read_user_id
    // =========================================================================

    #[test]
    fn test_read_user_id_without_cookie() {
        let ctx = StubContext::default();
        assert!(read_user_id(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_read_user_id_empty_cookie() {
        let ctx = StubContext::with_cookie(AUTH_COOKIE, "");
        assert!(read_user_id(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_read_user_id_numeric_cookie() {
        let ctx = StubContext::with_cookie(AUTH_COOKIE, "42");
        assert_eq!(read_user_id(&ctx).unwrap(), Some(UserId::new(42)));
    }

    #[test]
    fn test_read_user_id_malformed_cookie() {
        let ctx = StubContext::with_cookie(AUTH_COOKIE, "not-a-number");
        assert!(matches!(
            read_user_id(&ctx),
            Err(IdentityError::MalformedAuthCookie(_))
        ));
    }

    #[test]
    fn test_read_user_id_ignores_admin_cookie() {
        let ctx = StubContext::with_cookie(ADMIN_COOKIE, "42");
        assert!(read_user_id(&ctx).unwrap().is_none());
    }

    // =========================================================================
    // load_user
    // =========================================================================

    #[tokio::test]
    async fn test_load_user_without_user_id_skips_store() {
        let store = MemoryStore::with_user(42);
        let ctx = StubContext::default();

        assert!(load_user(&ctx, &store).await.unwrap().is_none());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_load_user_found() {
        let store = MemoryStore::with_user(42);
        let ctx = StubContext {
            user_id: Some(UserId::new(42)),
            ..StubContext::default()
        };

        let user = load_user(&ctx, &store).await.unwrap().unwrap();
        assert_eq!(user.id, UserId::new(42));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_load_user_missing_from_store() {
        let store = MemoryStore::default();
        let ctx = StubContext {
            user_id: Some(UserId::new(42)),
            ..StubContext::default()
        };

        assert!(load_user(&ctx, &store).await.unwrap().is_none());
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_load_user_uses_context_id_not_cookie() {
        // The auth cookie is only read by `read_user_id`.
        let store = MemoryStore::with_user(42);
        let ctx = StubContext::with_cookie(AUTH_COOKIE, "42");

        assert!(load_user(&ctx, &store).await.unwrap().is_none());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_load_user_store_failure_propagates() {
        let ctx = StubContext {
            user_id: Some(UserId::new(1)),
            ..StubContext::default()
        };

        assert!(load_user(&ctx, &FailingStore).await.is_err());
    }

    // =========================================================================
    // admin_status
    // =========================================================================

    #[test]
    fn test_admin_status_without_cookie_skips_comparison() {
        let matcher = CountingMatcher {
            secret: "key",
            calls: Cell::new(0),
        };
        let ctx = StubContext::default();

        assert!(!admin_status(&ctx, &matcher));
        assert_eq!(matcher.calls.get(), 0);
    }

    #[test]
    fn test_admin_status_empty_cookie_skips_comparison() {
        let matcher = CountingMatcher {
            secret: "key",
            calls: Cell::new(0),
        };
        let ctx = StubContext::with_cookie(ADMIN_COOKIE, "");

        assert!(!admin_status(&ctx, &matcher));
        assert_eq!(matcher.calls.get(), 0);
    }

    #[test]
    fn test_admin_status_runs_comparison_when_cookie_present() {
        let matcher = CountingMatcher {
            secret: "key",
            calls: Cell::new(0),
        };
        let ctx = StubContext::with_cookie(ADMIN_COOKIE, "nope");

        assert!(!admin_status(&ctx, &matcher));
        assert_eq!(matcher.calls.get(), 1);
    }

    #[test]
    fn test_admin_status_exact_secret() {
        let ctx = StubContext::with_cookie(ADMIN_COOKIE, "s3cr3t-Adm1n-K3y");
        assert!(admin_status(&ctx, &admin_secret()));
    }

    #[test]
    fn test_admin_status_single_char_difference() {
        let ctx = StubContext::with_cookie(ADMIN_COOKIE, "s3cr3t-Adm1n-K3Y");
        assert!(!admin_status(&ctx, &admin_secret()));
    }

    #[test]
    fn test_admin_status_ignores_auth_cookie() {
        let ctx = StubContext::with_cookie(AUTH_COOKIE, "s3cr3t-Adm1n-K3y");
        assert!(!admin_status(&ctx, &admin_secret()));
    }

    // =========================================================================
    // login_url
    // =========================================================================

    #[test]
    fn test_login_url() {
        let ctx = StubContext {
            name: "/dashboard",
            ..StubContext::default()
        };
        assert_eq!(login_url(&ctx), "/login?return_to=/dashboard");
    }

    #[test]
    fn test_login_url_is_not_escaped() {
        let ctx = StubContext {
            name: "/search?q=a&b",
            ..StubContext::default()
        };
        assert_eq!(login_url(&ctx), "/login?return_to=/search?q=a&b");
    }

    // =========================================================================
    // IdentityService
    // =========================================================================

    #[tokio::test]
    async fn test_service_delegates() {
        let service = IdentityService::new(MemoryStore::with_user(7), admin_secret());
        let ctx = StubContext {
            cookies: HashMap::from([(ADMIN_COOKIE, "s3cr3t-Adm1n-K3y")]),
            user_id: Some(UserId::new(7)),
            name: "/",
        };

        assert!(service.admin_status(&ctx));
        assert_eq!(
            service.load_user(&ctx).await.unwrap().map(|u| u.login),
            Some("user7".to_owned())
        );
        assert_eq!(service.store().calls(), 1);
    }
}
