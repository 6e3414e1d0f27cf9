//! The request-context contract consumed by the identity service.

use gitfund_core::UserId;

/// Per-request view of the incoming request.
///
/// Implemented by [`CookieContext`](crate::middleware::auth::CookieContext)
/// for axum requests and by in-memory doubles in tests.
pub trait RequestContext {
    /// Return the decoded value of a signed cookie.
    ///
    /// Returns `None` if the cookie is missing or its signature does not verify.
    fn signed_cookie(&self, name: &str) -> Option<String>;

    /// The user ID resolved for this request, if any.
    fn user_id(&self) -> Option<UserId>;

    /// The path identifying the requested resource.
    fn name(&self) -> &str;
}
