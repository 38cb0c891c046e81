// ============================================================================
// Menu Core - Category Entity
// File: crates/menu-core/src/domain/category.rs
// Description: Menu category (one tab of the menu)
// ============================================================================

use chrono::{DateTime, Utc};
use menu_shared::utils::non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::language::{localized, Language};
use crate::error::DomainError;

/// Category entity as stored in the `categories` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name_tr: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub subtitle_tr: Option<String>,
    #[serde(default)]
    pub subtitle_en: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn name(&self, lang: Language) -> &str {
        localized(&self.name_tr, self.name_en.as_deref(), lang)
    }

    pub fn subtitle(&self, lang: Language) -> &str {
        localized(
            self.subtitle_tr.as_deref().unwrap_or(""),
            self.subtitle_en.as_deref(),
            lang,
        )
    }

    /// Case-insensitive comparison on the Turkish name
    pub fn has_name(&self, name_tr: &str) -> bool {
        self.name_tr.trim().to_lowercase() == name_tr.trim().to_lowercase()
    }
}

/// Category reference joined onto menu items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name_tr: String,
    #[serde(default)]
    pub name_en: Option<String>,
}

/// Raw category form as submitted by the admin dashboard
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Turkish category name is required"))]
    pub name_tr: String,
    #[serde(default)]
    pub name_en: String,
}

/// Validated category names
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name_tr: String,
    pub name_en: Option<String>,
}

impl CategoryForm {
    pub fn into_input(self) -> Result<CategoryInput, DomainError> {
        let form = CategoryForm {
            name_tr: self.name_tr.trim().to_string(),
            name_en: self.name_en.trim().to_string(),
        };
        form.validate()
            .map_err(|_| DomainError::CategoryNameRequired)?;

        Ok(CategoryInput {
            name_en: non_empty(&form.name_en),
            name_tr: form.name_tr,
        })
    }
}

/// Insert payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub name_tr: String,
    pub name_en: Option<String>,
    pub subtitle_tr: Option<String>,
    pub subtitle_en: Option<String>,
    pub display_order: i32,
}

impl CategoryDraft {
    /// New category with generated subtitles
    pub fn new(input: CategoryInput, display_order: i32) -> Self {
        let subtitle_tr = Some(format!("Özenle hazırlanmış {}", input.name_tr.to_lowercase()));
        let subtitle_en = input
            .name_en
            .as_ref()
            .map(|name| format!("Expertly crafted {}", name.to_lowercase()));

        Self {
            name_tr: input.name_tr,
            name_en: input.name_en,
            subtitle_tr,
            subtitle_en,
            display_order,
        }
    }
}

/// Update payload; subtitles and ordering stay as they are
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChanges {
    pub name_tr: String,
    pub name_en: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryChanges {
    pub fn new(input: CategoryInput) -> Self {
        Self {
            name_tr: input.name_tr,
            name_en: input.name_en,
            updated_at: Utc::now(),
        }
    }
}
