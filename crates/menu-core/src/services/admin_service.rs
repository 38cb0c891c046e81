// ============================================================================
// Menu Core - Admin Service
// File: crates/menu-core/src/services/admin_service.rs
// ============================================================================
//! Dashboard loading and menu content mutations

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    resolve_image, Category, CategoryChanges, CategoryDraft, CategoryForm, ImagePolicy, ImageSelection,
    ItemForm, MenuCatalog, MenuItem, MenuItemChanges, MenuItemDraft,
};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

/// Outcome of loading the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardLoad {
    Ready(MenuCatalog),
    /// Backend tables are missing; show setup instructions
    NotProvisioned,
}

/// Admin operations over categories and menu items.
///
/// Every check that needs the current data (uniqueness, item counts, display
/// order) runs against a freshly fetched catalog; validation failures return
/// before any write is issued.
pub struct AdminService<C: CategoryRepository, I: MenuItemRepository> {
    category_repo: Arc<C>,
    item_repo: Arc<I>,
    images: ImagePolicy,
}

impl<C: CategoryRepository, I: MenuItemRepository> AdminService<C, I> {
    pub fn new(category_repo: Arc<C>, item_repo: Arc<I>, images: ImagePolicy) -> Self {
        Self {
            category_repo,
            item_repo,
            images,
        }
    }

    pub fn image_policy(&self) -> &ImagePolicy {
        &self.images
    }

    pub async fn load_dashboard(&self) -> Result<DashboardLoad, DomainError> {
        match self.load_catalog().await {
            Ok(catalog) => Ok(DashboardLoad::Ready(catalog)),
            Err(DomainError::NotProvisioned(reason)) => {
                warn!("Menu tables are not provisioned: {}", reason);
                Ok(DashboardLoad::NotProvisioned)
            }
            Err(e) => Err(e),
        }
    }

    /// Add an item. New items go to the end of the display order.
    pub async fn create_item(&self, form: ItemForm, selection: &ImageSelection) -> Result<MenuItem, DomainError> {
        let input = form.into_input()?;
        let catalog = self.load_catalog().await?;
        catalog.ensure_category_exists(input.category_id)?;

        let image = resolve_image(
            selection.inline(),
            input.image_url.as_deref(),
            None,
            &self.images.placeholder,
        );
        let draft = MenuItemDraft::new(input, image, catalog.next_item_display_order());
        let item = self.item_repo.create(&draft).await?;

        info!("Menu item created: {} ({})", item.name_tr, item.id);
        Ok(item)
    }

    pub async fn update_item(
        &self,
        id: &Uuid,
        form: ItemForm,
        selection: &ImageSelection,
    ) -> Result<MenuItem, DomainError> {
        let input = form.into_input()?;
        let catalog = self.load_catalog().await?;
        let existing = catalog.item(*id).ok_or(DomainError::MenuItemNotFound(*id))?;
        catalog.ensure_category_exists(input.category_id)?;

        let image = resolve_image(
            selection.inline(),
            input.image_url.as_deref(),
            existing.image.as_deref(),
            &self.images.placeholder,
        );
        let changes = MenuItemChanges::new(input, image);
        let item = self.item_repo.update(id, &changes).await?;

        info!("Menu item updated: {} ({})", item.name_tr, item.id);
        Ok(item)
    }

    pub async fn delete_item(&self, id: &Uuid) -> Result<(), DomainError> {
        self.item_repo.delete(id).await?;
        info!("Menu item deleted: {}", id);
        Ok(())
    }

    pub async fn create_category(&self, form: CategoryForm) -> Result<Category, DomainError> {
        let input = form.into_input()?;
        let categories = self.category_repo.list().await?;
        let catalog = MenuCatalog::new(categories, Vec::new());
        catalog.ensure_unique_category_name(&input.name_tr)?;

        let draft = CategoryDraft::new(input, catalog.next_category_display_order());
        let category = self.category_repo.create(&draft).await?;

        info!("Category created: {} ({})", category.name_tr, category.id);
        Ok(category)
    }

    pub async fn update_category(&self, id: &Uuid, form: CategoryForm) -> Result<Category, DomainError> {
        let input = form.into_input()?;
        let category = self.category_repo.update(id, &CategoryChanges::new(input)).await?;

        info!("Category updated: {} ({})", category.name_tr, category.id);
        Ok(category)
    }

    /// Delete an empty category. Returns the tab to show afterwards.
    pub async fn delete_category(&self, id: &Uuid, active: Option<Uuid>) -> Result<Option<Uuid>, DomainError> {
        let catalog = self.load_catalog().await?;
        if let Err(e) = catalog.ensure_category_deletable(*id) {
            warn!("Refusing to delete category {}: {}", id, e);
            return Err(e);
        }

        self.category_repo.delete(id).await?;
        info!("Category deleted: {}", id);
        Ok(catalog.tab_after_delete(*id, active))
    }

    async fn load_catalog(&self) -> Result<MenuCatalog, DomainError> {
        let categories = self.category_repo.list().await?;
        let items = self.item_repo.list_all().await?;
        Ok(MenuCatalog::new(categories, items))
    }
}
