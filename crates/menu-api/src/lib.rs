//! # Menu API
//!
//! Server-rendered public menu, admin dashboard, session middleware and router.

pub mod error;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
pub use views::Views;
