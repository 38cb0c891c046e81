//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Missing required menu item fields")]
    MissingItemFields,

    #[error("Turkish category name is required")]
    CategoryNameRequired,

    #[error("Category name already exists: {0}")]
    CategoryNameAlreadyExists(String),

    #[error("Category still has {item_count} menu items")]
    CategoryNotEmpty { item_count: usize },

    #[error("Unknown category: {0}")]
    UnknownCategory(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(Uuid),

    #[error("Invalid image type: {0}")]
    InvalidImageType(String),

    #[error("Image too large: {size} bytes (limit {limit})")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Database not provisioned: {0}")]
    NotProvisioned(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Rejected before any remote call was made
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::MissingItemFields
                | DomainError::CategoryNameRequired
                | DomainError::CategoryNameAlreadyExists(_)
                | DomainError::CategoryNotEmpty { .. }
                | DomainError::UnknownCategory(_)
                | DomainError::InvalidImageType(_)
                | DomainError::ImageTooLarge { .. }
                | DomainError::MissingCredentials
                | DomainError::ValidationError(_)
        )
    }
}
