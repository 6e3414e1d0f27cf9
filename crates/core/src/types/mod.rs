//! Core types for GitFund.

pub mod cookie;
pub mod id;

pub use cookie::{ADMIN_COOKIE, AUTH_COOKIE, LOGIN_PATH, RETURN_TO_PARAM};
pub use id::*;
