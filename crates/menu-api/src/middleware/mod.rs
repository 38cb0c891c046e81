//! Request middleware

pub mod auth;

pub use auth::{authenticate, clear_session_cookie, require_admin, set_session_cookie, AdminSession};
