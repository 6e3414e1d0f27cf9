//! HTTP middleware and request extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//!
//! Identity is resolved per handler through the extractors in [`auth`].

pub mod auth;

pub use auth::{AuthRejection, CookieContext, OptionalUser, RequireAdmin, RequireUser};
