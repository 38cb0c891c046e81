//! Category repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Category, CategoryChanges, CategoryDraft};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ascending display order
    async fn list(&self) -> Result<Vec<Category>, DomainError>;
    async fn create(&self, draft: &CategoryDraft) -> Result<Category, DomainError>;
    async fn update(&self, id: &Uuid, changes: &CategoryChanges) -> Result<Category, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
