//! Domain models for the web service.

pub mod user;

pub use user::User;
