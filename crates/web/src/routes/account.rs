//! Account route handlers.

use crate::middleware::{OptionalUser, RequireAdmin, RequireUser};

/// `GET /` - greets the caller, logged in or not.
pub async fn home(OptionalUser(user): OptionalUser) -> String {
    match user {
        Some(user) => format!("Hello, {}!", user.login),
        None => "Hello, guest!".to_string(),
    }
}

/// `GET /account` - requires a logged-in user.
pub async fn index(RequireUser(user): RequireUser) -> String {
    format!("Signed in as {} (#{})", user.login, user.id)
}

/// `GET /admin` - requires the admin cookie.
pub async fn admin(_: RequireAdmin) -> &'static str {
    "GitFund admin"
}
