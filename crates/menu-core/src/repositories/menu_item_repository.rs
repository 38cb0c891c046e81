//! Menu item repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{MenuItem, MenuItemChanges, MenuItemDraft};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Every item with its joined category, ascending display order
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError>;
    /// Items with `is_available = true`, ascending display order
    async fn list_available(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn list_featured(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_available(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError>;
    async fn create(&self, draft: &MenuItemDraft) -> Result<MenuItem, DomainError>;
    async fn update(&self, id: &Uuid, changes: &MenuItemChanges) -> Result<MenuItem, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
