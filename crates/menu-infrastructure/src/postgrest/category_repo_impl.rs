// ============================================================================
// Menu Infrastructure - PostgREST Category Repository
// File: crates/menu-infrastructure/src/postgrest/category_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

use menu_core::domain::{Category, CategoryChanges, CategoryDraft};
use menu_core::error::DomainError;
use menu_core::repositories::CategoryRepository;
use menu_shared::constants::TABLE_CATEGORIES;

use super::client::PostgrestClient;
use super::query::TableQuery;
use crate::error::RemoteError;

pub struct PostgrestCategoryRepository {
    client: PostgrestClient,
}

impl PostgrestCategoryRepository {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

fn backend_error(action: &str, e: RemoteError) -> DomainError {
    error!("Backend error {} categories: {}", action, e);
    e.into()
}

#[async_trait]
impl CategoryRepository for PostgrestCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let query = TableQuery::from(TABLE_CATEGORIES)
            .select("*")
            .order("display_order", true);

        self.client
            .select(&query)
            .await
            .map_err(|e| backend_error("listing", e))
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<Category, DomainError> {
        let rows: Vec<Category> = self
            .client
            .insert(TABLE_CATEGORIES, draft)
            .await
            .map_err(|e| backend_error("inserting", e))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DomainError::BackendError("Category insert returned no row".to_string()))
    }

    async fn update(&self, id: &Uuid, changes: &CategoryChanges) -> Result<Category, DomainError> {
        let query = TableQuery::from(TABLE_CATEGORIES).eq("id", id);
        let rows: Vec<Category> = self
            .client
            .update(&query, changes)
            .await
            .map_err(|e| backend_error("updating", e))?;

        rows.into_iter().next().ok_or(DomainError::CategoryNotFound(*id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let query = TableQuery::from(TABLE_CATEGORIES).eq("id", id);
        self.client
            .delete(&query)
            .await
            .map_err(|e| backend_error("deleting", e))
    }
}
