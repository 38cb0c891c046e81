//! Domain services (business logic)

pub mod menu_service;
pub mod admin_service;
pub mod auth_service;

pub use menu_service::MenuService;
pub use admin_service::{AdminService, DashboardLoad};
pub use auth_service::{AuthService, SessionCheck};
