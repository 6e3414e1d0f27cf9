//! GitFund web library.
//!
//! Resolves the caller's identity from signed cookies and exposes it to
//! axum handlers. Built as a library so it can be tested and reused by the
//! `gitfund-web` binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
