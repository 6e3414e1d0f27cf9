//! HTTP route handlers for the web service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Greeting (optional user)
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (database)
//!
//! # Account (requires auth)
//! GET  /account         - Account overview
//!
//! # Admin (requires admin cookie)
//! GET  /admin           - Admin landing page
//!
//! # API
//! GET  /api/session     - Current user, admin flag and login URL as JSON
//! ```

pub mod account;
pub mod session;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create all routes for the web service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/account", get(account::index))
        .route("/admin", get(account::admin))
        .route("/api/session", get(session::show))
}

/// Build the application router with tracing attached.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
