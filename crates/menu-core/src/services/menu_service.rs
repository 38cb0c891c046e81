//! Public menu reads

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{MenuCatalog, MenuItem};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

/// Read-only access for the public menu and landing pages
pub struct MenuService<C: CategoryRepository, I: MenuItemRepository> {
    category_repo: Arc<C>,
    item_repo: Arc<I>,
}

impl<C: CategoryRepository, I: MenuItemRepository> MenuService<C, I> {
    pub fn new(category_repo: Arc<C>, item_repo: Arc<I>) -> Self {
        Self { category_repo, item_repo }
    }

    /// Ordered categories plus available items
    pub async fn load_public_menu(&self) -> Result<MenuCatalog, DomainError> {
        let categories = self.category_repo.list().await?;
        let items = self.item_repo.list_available().await?;
        debug!("Public menu: {} categories, {} items", categories.len(), items.len());
        Ok(MenuCatalog::new(categories, items))
    }

    pub async fn featured_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.item_repo.list_featured().await
    }

    pub async fn find_item(&self, id: &Uuid) -> Result<MenuItem, DomainError> {
        self.item_repo
            .find_available(id)
            .await?
            .ok_or(DomainError::MenuItemNotFound(*id))
    }
}
