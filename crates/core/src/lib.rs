//! GitFund Core - Shared identity types.
//!
//! This crate provides the types shared between the GitFund web service and
//! anything else that needs to talk about users:
//! - `web` - Request identity, admin checks and the HTTP surface
//!
//! # Architecture
//!
//! The core crate contains only types and constants - no I/O, no database
//! access, no HTTP. The optional `postgres` feature adds `sqlx` encoding for
//! the ID types.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the well-known cookie names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
