//! Application-wide constants

pub const TABLE_CATEGORIES: &str = "categories";
pub const TABLE_MENU_ITEMS: &str = "menu_items";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/static/delicious-food.svg";
pub const MAX_IMAGE_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const SESSION_COOKIE_NAME: &str = "menu_session";
pub const TOAST_COOKIE_NAME: &str = "_toast";
pub const DEFAULT_SESSION_TTL: i64 = 604800;
/// Relation-not-found classifications reported by the REST backend
pub const MISSING_RELATION_CODES: [&str; 2] = ["42P01", "PGRST205"];
