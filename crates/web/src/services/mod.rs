//! Business logic services for the web service.
//!
//! # Services
//!
//! - `identity` - Who the caller is (signed-cookie user ID, admin status, login redirect)

pub mod identity;
