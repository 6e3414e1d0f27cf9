//! Session introspection API.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::CookieContext;
use crate::models::User;
use crate::services::identity;
use crate::state::AppState;

/// Who the caller is, as seen from their cookies.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    /// The logged-in user, if any.
    pub user: Option<User>,
    /// Whether the admin cookie matched.
    pub is_admin: bool,
    /// Where to send the caller to log in and come back here.
    pub login_url: String,
}

/// `GET /api/session`
pub async fn show(State(state): State<AppState>, ctx: CookieContext) -> Result<Json<SessionInfo>> {
    let user = state.identity().load_user(&ctx).await?;

    Ok(Json(SessionInfo {
        user,
        is_admin: state.identity().admin_status(&ctx),
        login_url: identity::login_url(&ctx),
    }))
}
