//! # Menu Core - Domain Module
//!
//! Domain entities for the menu site.

pub mod language;
pub mod category;
pub mod menu_item;
pub mod catalog;
pub mod image;
pub mod localized;
pub mod session;

// Re-export all entities and helpers
pub use language::{localized, localized_opt, split_list, Language, UnknownLanguage};
pub use category::{Category, CategoryChanges, CategoryDraft, CategoryForm, CategoryInput, CategorySummary};
pub use menu_item::{ItemForm, ItemInput, MenuItem, MenuItemChanges, MenuItemDraft, NutritionFacts};
pub use catalog::{FormMode, MenuCatalog};
pub use image::{resolve_image, ImagePolicy, ImageSelection, ImageUpload};
pub use localized::{format_price, ImageCarousel, LocalizedCategory, LocalizedItem};
pub use session::{AuthSession, AuthTokens, AuthUser};
