//! # Menu Security
//!
//! Security utilities: signed session cookies and CSRF tokens.

pub mod jwt;
pub mod session;
pub mod csrf;

pub use jwt::{JwtError, JwtService, SessionClaims};
pub use session::{Session, SessionService};
pub use csrf::CsrfGuard;
