//! Authentication extractors.
//!
//! Bridges axum requests to the identity service. [`CookieContext`] is the
//! per-request [`RequestContext`]; the other extractors build on it to
//! require or optionally resolve a user, or to require admin status.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use gitfund_core::UserId;

use crate::error::{AppError, set_sentry_user};
use crate::models::User;
use crate::services::identity::{self, IdentityError, RequestContext};
use crate::state::AppState;

/// Request context backed by the signed cookie jar.
///
/// The user ID is resolved once, when the context is built, from the `auth`
/// cookie. Cookies whose signature does not verify read as absent.
pub struct CookieContext {
    jar: SignedCookieJar,
    name: String,
    user_id: Option<UserId>,
}

impl CookieContext {
    /// Build a context for the request at `name`.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::MalformedAuthCookie` if the signed `auth`
    /// cookie is not a base-10 integer.
    pub fn new(jar: SignedCookieJar, name: impl Into<String>) -> Result<Self, IdentityError> {
        let mut ctx = Self {
            jar,
            name: name.into(),
            user_id: None,
        };
        ctx.user_id = identity::read_user_id(&ctx)?;
        Ok(ctx)
    }

    /// Whether this request targets the JSON API.
    fn is_api(&self) -> bool {
        self.name.starts_with("/api/")
    }

    /// Rejection for a request that lacks the required identity.
    fn reject(&self) -> AuthRejection {
        if self.is_api() {
            AuthRejection::Unauthorized
        } else {
            AuthRejection::RedirectToLogin(identity::login_url(self))
        }
    }
}

impl RequestContext for CookieContext {
    fn signed_cookie(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_owned())
    }

    fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Error returned when a request lacks the identity a handler requires.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin(String),
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Identity could not be resolved at all.
    Error(AppError),
}

impl From<AppError> for AuthRejection {
    fn from(err: AppError) -> Self {
        Self::Error(err)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(url) => Redirect::to(&url).into_response(),
            Self::Unauthorized => {
                AppError::Unauthorized("login required".to_string()).into_response()
            }
            Self::Error(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for CookieContext {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key().clone());

        Self::new(jar, parts.uri.path()).map_err(|err| {
            tracing::warn!(
                error = %err,
                path = %parts.uri.path(),
                "rejecting request with malformed auth cookie"
            );
            AuthRejection::Error(err.into())
        })
    }
}

/// Extractor that optionally gets the current user.
///
/// Does not reject the request if nobody is logged in or the user no longer
/// exists.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalUser(user): OptionalUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.login),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalUser(pub Option<User>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = CookieContext::from_request_parts(parts, state).await?;
        let user = state
            .identity()
            .load_user(&ctx)
            .await
            .map_err(AppError::from)?;

        if let Some(user) = &user {
            set_sentry_user(&user.id);
        }

        Ok(Self(user))
    }
}

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, HTML requests are redirected to the login page with
/// a `return_to` pointing back here; API requests get 401 Unauthorized.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.login)
/// }
/// ```
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = CookieContext::from_request_parts(parts, state).await?;
        let user = state
            .identity()
            .load_user(&ctx)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| ctx.reject())?;

        set_sentry_user(&user.id);
        Ok(Self(user))
    }
}

/// Extractor that requires the admin cookie to match the admin auth key.
///
/// Rejects the same way as [`RequireUser`].
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = CookieContext::from_request_parts(parts, state).await?;
        if state.identity().admin_status(&ctx) {
            Ok(Self)
        } else {
            tracing::debug!(path = %ctx.name(), "admin check failed");
            Err(ctx.reject())
        }
    }
}
