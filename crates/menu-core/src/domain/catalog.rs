// ============================================================================
// Menu Core - Menu Catalog
// File: crates/menu-core/src/domain/catalog.rs
// Description: Fetched categories + items and the rules checked against them
// ============================================================================

use uuid::Uuid;

use super::category::Category;
use super::menu_item::MenuItem;
use crate::error::DomainError;

/// In-memory copy of the two remote tables, both sorted by display order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        Self { categories, items }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: Uuid) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items_for_category(&self, category_id: Uuid) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(move |i| i.category_id == category_id)
    }

    pub fn item_count(&self, category_id: Uuid) -> usize {
        self.items_for_category(category_id).count()
    }

    /// Requested tab if it still exists, else the first category
    pub fn resolve_active(&self, requested: Option<Uuid>) -> Option<Uuid> {
        requested
            .filter(|id| self.category(*id).is_some())
            .or_else(|| self.categories.first().map(|c| c.id))
    }

    pub fn ensure_category_exists(&self, id: Uuid) -> Result<&Category, DomainError> {
        self.category(id).ok_or(DomainError::UnknownCategory(id))
    }

    pub fn ensure_category_deletable(&self, id: Uuid) -> Result<(), DomainError> {
        match self.item_count(id) {
            0 => Ok(()),
            item_count => Err(DomainError::CategoryNotEmpty { item_count }),
        }
    }

    pub fn ensure_unique_category_name(&self, name_tr: &str) -> Result<(), DomainError> {
        if self.categories.iter().any(|c| c.has_name(name_tr)) {
            return Err(DomainError::CategoryNameAlreadyExists(name_tr.trim().to_string()));
        }
        Ok(())
    }

    pub fn next_item_display_order(&self) -> i32 {
        self.items.len() as i32 + 1
    }

    pub fn next_category_display_order(&self) -> i32 {
        self.categories.len() as i32 + 1
    }

    /// Active tab once `deleted` is gone
    pub fn tab_after_delete(&self, deleted: Uuid, active: Option<Uuid>) -> Option<Uuid> {
        match active {
            Some(active) if active != deleted => Some(active),
            _ => self
                .categories
                .iter()
                .find(|c| c.id != deleted)
                .map(|c| c.id),
        }
    }
}

/// Editing target of a dashboard form: nothing selected means creating
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormMode<'a, T> {
    Creating,
    Editing(&'a T),
}

impl<'a, T> From<Option<&'a T>> for FormMode<'a, T> {
    fn from(target: Option<&'a T>) -> Self {
        match target {
            Some(entity) => FormMode::Editing(entity),
            None => FormMode::Creating,
        }
    }
}

impl<'a, T> FormMode<'a, T> {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Editing(_))
    }

    pub fn target(&self) -> Option<&'a T> {
        match self {
            FormMode::Editing(entity) => Some(*entity),
            FormMode::Creating => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::NutritionFacts;
    use rust_decimal::Decimal;

    pub fn category(name_tr: &str, display_order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            name_tr: name_tr.to_string(),
            name_en: None,
            subtitle_tr: None,
            subtitle_en: None,
            display_order,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn item(name_tr: &str, category_id: Uuid, display_order: i32) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name_tr: name_tr.to_string(),
            name_en: None,
            description_tr: format!("{} açıklaması", name_tr),
            description_en: None,
            ingredients_tr: Some("tuz, karabiber".to_string()),
            ingredients_en: None,
            allergens_tr: None,
            allergens_en: None,
            chef_recommendation_tr: None,
            chef_recommendation_en: None,
            price: Decimal::from(100),
            category_id,
            image: Some("/img/dish.png".to_string()),
            gallery_images: None,
            nutrition: NutritionFacts::default(),
            is_available: true,
            is_featured: false,
            display_order,
            created_at: None,
            updated_at: None,
            category: None,
        }
    }
}
