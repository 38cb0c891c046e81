// ============================================================================
// Menu Infrastructure - PostgREST Menu Item Repository
// File: crates/menu-infrastructure/src/postgrest/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

use menu_core::domain::{MenuItem, MenuItemChanges, MenuItemDraft};
use menu_core::error::DomainError;
use menu_core::repositories::MenuItemRepository;
use menu_shared::constants::TABLE_MENU_ITEMS;

use super::client::PostgrestClient;
use super::query::TableQuery;
use crate::error::RemoteError;

/// Admin listing joins the owning category's names
const SELECT_WITH_CATEGORY: &str = "*,categories(id,name_tr,name_en)";

pub struct PostgrestMenuItemRepository {
    client: PostgrestClient,
}

impl PostgrestMenuItemRepository {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }

    fn available() -> TableQuery {
        TableQuery::from(TABLE_MENU_ITEMS)
            .select("*")
            .eq("is_available", true)
    }
}

fn backend_error(action: &str, e: RemoteError) -> DomainError {
    error!("Backend error {} menu items: {}", action, e);
    e.into()
}

#[async_trait]
impl MenuItemRepository for PostgrestMenuItemRepository {
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let query = TableQuery::from(TABLE_MENU_ITEMS)
            .select(SELECT_WITH_CATEGORY)
            .order("display_order", true);

        self.client
            .select(&query)
            .await
            .map_err(|e| backend_error("listing", e))
    }

    async fn list_available(&self) -> Result<Vec<MenuItem>, DomainError> {
        let query = Self::available().order("display_order", true);
        self.client
            .select(&query)
            .await
            .map_err(|e| backend_error("listing available", e))
    }

    async fn list_featured(&self) -> Result<Vec<MenuItem>, DomainError> {
        let query = Self::available()
            .eq("is_featured", true)
            .order("display_order", true);
        self.client
            .select(&query)
            .await
            .map_err(|e| backend_error("listing featured", e))
    }

    async fn find_available(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        let query = Self::available().eq("id", id).limit(1);
        let rows: Vec<MenuItem> = self
            .client
            .select(&query)
            .await
            .map_err(|e| backend_error("fetching", e))?;

        Ok(rows.into_iter().next())
    }

    async fn create(&self, draft: &MenuItemDraft) -> Result<MenuItem, DomainError> {
        let rows: Vec<MenuItem> = self
            .client
            .insert(TABLE_MENU_ITEMS, draft)
            .await
            .map_err(|e| backend_error("inserting", e))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DomainError::BackendError("Menu item insert returned no row".to_string()))
    }

    async fn update(&self, id: &Uuid, changes: &MenuItemChanges) -> Result<MenuItem, DomainError> {
        let query = TableQuery::from(TABLE_MENU_ITEMS).eq("id", id);
        let rows: Vec<MenuItem> = self
            .client
            .update(&query, changes)
            .await
            .map_err(|e| backend_error("updating", e))?;

        rows.into_iter().next().ok_or(DomainError::MenuItemNotFound(*id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let query = TableQuery::from(TABLE_MENU_ITEMS).eq("id", id);
        self.client
            .delete(&query)
            .await
            .map_err(|e| backend_error("deleting", e))
    }
}
