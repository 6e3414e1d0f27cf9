//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gitfund_core::UserId;

/// A GitFund user (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub login: String,
    /// Contact email, if the user has given one.
    pub email: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
