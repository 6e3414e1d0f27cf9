//! Well-known cookie names and login routing constants.
//!
//! Both cookies are signed by the web layer; a value read through the signed
//! jar has already passed integrity verification.

/// Signed cookie holding the logged-in user's numeric ID.
pub const AUTH_COOKIE: &str = "auth";

/// Signed cookie holding the admin auth key.
pub const ADMIN_COOKIE: &str = "admin";

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the page to come back to after login.
pub const RETURN_TO_PARAM: &str = "return_to";
