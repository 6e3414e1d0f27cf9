//! Identity error types.

use std::num::ParseIntError;

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur while resolving the request's identity.
///
/// Absence (no cookie, no user) is never an error; it is `None` at the call site.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The signed `auth` cookie verified but does not hold a base-10 integer.
    ///
    /// A correctly signed cookie always carries a well-formed ID, so this
    /// points at a signing-key compromise or a cookie format change upstream.
    #[error("malformed auth cookie: {0}")]
    MalformedAuthCookie(#[from] ParseIntError),

    /// The user store failed to answer.
    #[error("user store error: {0}")]
    Store(#[from] RepositoryError),
}
