//! User repository for database operations.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gitfund_core::UserId;

use super::RepositoryError;
use crate::models::User;

/// Lookup of users by ID.
///
/// A missing user is `Ok(None)`: the account may have been deleted after its
/// cookie was issued. `Err` is reserved for the store itself failing.
pub trait UserStore: Send + Sync {
    /// Fetch a user by ID.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RepositoryError>> + Send;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    login: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            login: row.login,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// `PostgreSQL`-backed user store.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for UserRepository {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, login, email, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
