// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Dish entity, admin form and write payloads
// ============================================================================

use std::str::FromStr;

use chrono::{DateTime, Utc};
use menu_shared::{types::parse_id, utils::non_empty};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::category::CategorySummary;
use crate::error::DomainError;

fn default_true() -> bool {
    true
}

/// Optional nutrition facts per portion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    #[serde(default)]
    pub calories: Option<i32>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
}

impl NutritionFacts {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein_g.is_none()
            && self.carbs_g.is_none()
            && self.fat_g.is_none()
    }
}

/// Menu item entity as stored in the `menu_items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name_tr: String,
    #[serde(default)]
    pub name_en: Option<String>,
    pub description_tr: String,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub ingredients_tr: Option<String>,
    #[serde(default)]
    pub ingredients_en: Option<String>,
    #[serde(default)]
    pub allergens_tr: Option<String>,
    #[serde(default)]
    pub allergens_en: Option<String>,
    #[serde(default)]
    pub chef_recommendation_tr: Option<String>,
    #[serde(default)]
    pub chef_recommendation_en: Option<String>,
    pub price: Decimal,
    pub category_id: Uuid,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub gallery_images: Option<Vec<String>>,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Joined category metadata (admin fetch only)
    #[serde(default, rename = "categories", skip_serializing)]
    pub category: Option<CategorySummary>,
}

impl MenuItem {
    pub fn gallery(&self) -> &[String] {
        self.gallery_images.as_deref().unwrap_or(&[])
    }

    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image
            .as_deref()
            .filter(|src| !src.trim().is_empty())
            .unwrap_or(placeholder)
    }
}

/// Raw item form as submitted by the admin dashboard (multipart text fields)
#[derive(Debug, Clone, Default, Validate)]
pub struct ItemForm {
    #[validate(length(min = 1))]
    pub name_tr: String,
    pub name_en: String,
    #[validate(length(min = 1))]
    pub description_tr: String,
    pub description_en: String,
    #[validate(length(min = 1))]
    pub ingredients_tr: String,
    pub ingredients_en: String,
    pub allergens_tr: String,
    pub allergens_en: String,
    pub chef_recommendation_tr: String,
    pub chef_recommendation_en: String,
    pub calories: String,
    pub protein_g: String,
    pub carbs_g: String,
    pub fat_g: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(length(min = 1))]
    pub category_id: String,
    /// Image URL typed into the form
    pub image: String,
    pub is_available: bool,
    pub is_featured: bool,
}

/// Validated item fields
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub name_tr: String,
    pub name_en: Option<String>,
    pub description_tr: String,
    pub description_en: Option<String>,
    pub ingredients_tr: String,
    pub ingredients_en: Option<String>,
    pub allergens_tr: Option<String>,
    pub allergens_en: Option<String>,
    pub chef_recommendation_tr: Option<String>,
    pub chef_recommendation_en: Option<String>,
    pub nutrition: NutritionFacts,
    pub price: Decimal,
    pub category_id: Uuid,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
}

impl ItemForm {
    /// Assign a text field by its form name. Returns false for unknown names.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name_tr" => &mut self.name_tr,
            "name_en" => &mut self.name_en,
            "description_tr" => &mut self.description_tr,
            "description_en" => &mut self.description_en,
            "ingredients_tr" => &mut self.ingredients_tr,
            "ingredients_en" => &mut self.ingredients_en,
            "allergens_tr" => &mut self.allergens_tr,
            "allergens_en" => &mut self.allergens_en,
            "chef_recommendation_tr" => &mut self.chef_recommendation_tr,
            "chef_recommendation_en" => &mut self.chef_recommendation_en,
            "calories" => &mut self.calories,
            "protein_g" => &mut self.protein_g,
            "carbs_g" => &mut self.carbs_g,
            "fat_g" => &mut self.fat_g,
            "price" => &mut self.price,
            "category_id" => &mut self.category_id,
            "image" => &mut self.image,
            "is_available" => {
                self.is_available = is_checked(&value);
                return true;
            }
            "is_featured" => {
                self.is_featured = is_checked(&value);
                return true;
            }
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn into_input(self) -> Result<ItemInput, DomainError> {
        let form = self.trimmed();
        form.validate().map_err(|_| DomainError::MissingItemFields)?;

        let price = Decimal::from_str(&form.price)
            .ok()
            .filter(|p| p.is_sign_positive() && !p.is_zero())
            .ok_or(DomainError::MissingItemFields)?;
        let category_id = parse_id(&form.category_id).ok_or(DomainError::MissingItemFields)?;

        Ok(ItemInput {
            nutrition: NutritionFacts {
                calories: parse_whole(&form.calories),
                protein_g: parse_decimal(&form.protein_g),
                carbs_g: parse_decimal(&form.carbs_g),
                fat_g: parse_decimal(&form.fat_g),
            },
            name_en: non_empty(&form.name_en),
            description_en: non_empty(&form.description_en),
            ingredients_en: non_empty(&form.ingredients_en),
            allergens_tr: non_empty(&form.allergens_tr),
            allergens_en: non_empty(&form.allergens_en),
            chef_recommendation_tr: non_empty(&form.chef_recommendation_tr),
            chef_recommendation_en: non_empty(&form.chef_recommendation_en),
            image_url: non_empty(&form.image),
            name_tr: form.name_tr,
            description_tr: form.description_tr,
            ingredients_tr: form.ingredients_tr,
            price,
            category_id,
            is_available: form.is_available,
            is_featured: form.is_featured,
        })
    }

    fn trimmed(self) -> Self {
        let t = |s: String| s.trim().to_string();
        Self {
            name_tr: t(self.name_tr),
            name_en: t(self.name_en),
            description_tr: t(self.description_tr),
            description_en: t(self.description_en),
            ingredients_tr: t(self.ingredients_tr),
            ingredients_en: t(self.ingredients_en),
            allergens_tr: t(self.allergens_tr),
            allergens_en: t(self.allergens_en),
            chef_recommendation_tr: t(self.chef_recommendation_tr),
            chef_recommendation_en: t(self.chef_recommendation_en),
            calories: t(self.calories),
            protein_g: t(self.protein_g),
            carbs_g: t(self.carbs_g),
            fat_g: t(self.fat_g),
            price: t(self.price),
            category_id: t(self.category_id),
            image: t(self.image),
            is_available: self.is_available,
            is_featured: self.is_featured,
        }
    }
}

fn is_checked(value: &str) -> bool {
    matches!(value.trim(), "on" | "true" | "1")
}

/// Leading integer part, so "12.7" reads as 12
fn parse_whole(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .or_else(|| parse_decimal(raw).map(|v| v.trunc() as i32))
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Insert payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemDraft {
    pub name_tr: String,
    pub name_en: Option<String>,
    pub description_tr: String,
    pub description_en: Option<String>,
    pub ingredients_tr: String,
    pub ingredients_en: Option<String>,
    pub allergens_tr: Option<String>,
    pub allergens_en: Option<String>,
    pub chef_recommendation_tr: Option<String>,
    pub chef_recommendation_en: Option<String>,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    pub price: Decimal,
    pub category_id: Uuid,
    pub image: String,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
}

impl MenuItemDraft {
    /// New items start available and not featured
    pub fn new(input: ItemInput, image: String, display_order: i32) -> Self {
        Self {
            name_tr: input.name_tr,
            name_en: input.name_en,
            description_tr: input.description_tr,
            description_en: input.description_en,
            ingredients_tr: input.ingredients_tr,
            ingredients_en: input.ingredients_en,
            allergens_tr: input.allergens_tr,
            allergens_en: input.allergens_en,
            chef_recommendation_tr: input.chef_recommendation_tr,
            chef_recommendation_en: input.chef_recommendation_en,
            nutrition: input.nutrition,
            price: input.price,
            category_id: input.category_id,
            image,
            is_available: true,
            is_featured: false,
            display_order,
        }
    }
}

/// Update payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemChanges {
    pub name_tr: String,
    pub name_en: Option<String>,
    pub description_tr: String,
    pub description_en: Option<String>,
    pub ingredients_tr: String,
    pub ingredients_en: Option<String>,
    pub allergens_tr: Option<String>,
    pub allergens_en: Option<String>,
    pub chef_recommendation_tr: Option<String>,
    pub chef_recommendation_en: Option<String>,
    #[serde(flatten)]
    pub nutrition: NutritionFacts,
    pub price: Decimal,
    pub category_id: Uuid,
    pub image: String,
    pub is_available: bool,
    pub is_featured: bool,
    pub updated_at: DateTime<Utc>,
}

impl MenuItemChanges {
    pub fn new(input: ItemInput, image: String) -> Self {
        Self {
            name_tr: input.name_tr,
            name_en: input.name_en,
            description_tr: input.description_tr,
            description_en: input.description_en,
            ingredients_tr: input.ingredients_tr,
            ingredients_en: input.ingredients_en,
            allergens_tr: input.allergens_tr,
            allergens_en: input.allergens_en,
            chef_recommendation_tr: input.chef_recommendation_tr,
            chef_recommendation_en: input.chef_recommendation_en,
            nutrition: input.nutrition,
            price: input.price,
            category_id: input.category_id,
            image,
            is_available: input.is_available,
            is_featured: input.is_featured,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled_form(category_id: Uuid) -> ItemForm {
        let mut form = ItemForm::default();
        form.set("name_tr", "Pirzola".to_string());
        form.set("description_tr", "Izgara kuzu pirzola".to_string());
        form.set("ingredients_tr", "kuzu, tuz, kekik".to_string());
        form.set("price", "450".to_string());
        form.set("category_id", category_id.to_string());
        form
    }

    #[test]
    fn test_valid_form_produces_input() {
        let category_id = Uuid::new_v4();
        let mut form = filled_form(category_id);
        form.set("name_en", "  ".to_string());
        form.set("calories", "612.8".to_string());
        form.set("protein_g", "41.5".to_string());
        form.set("carbs_g", "abc".to_string());

        let input = form.into_input().unwrap();
        assert_eq!(input.name_tr, "Pirzola");
        assert_eq!(input.name_en, None);
        assert_eq!(input.price, Decimal::from(450));
        assert_eq!(input.category_id, category_id);
        assert_eq!(input.nutrition.calories, Some(612));
        assert_eq!(input.nutrition.protein_g, Some(41.5));
        assert_eq!(input.nutrition.carbs_g, None);
        assert_eq!(input.image_url, None);
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        for field in ["name_tr", "description_tr", "ingredients_tr", "price", "category_id"] {
            let mut form = filled_form(Uuid::new_v4());
            form.set(field, " ".to_string());
            assert_eq!(form.into_input(), Err(DomainError::MissingItemFields), "field {}", field);
        }
    }

    #[test]
    fn test_zero_or_unparsable_price_is_rejected() {
        for price in ["0", "0.00", "-450", "ücretsiz"] {
            let mut form = filled_form(Uuid::new_v4());
            form.set("price", price.to_string());
            assert_eq!(form.into_input(), Err(DomainError::MissingItemFields));
        }
    }

    #[test]
    fn test_checkbox_fields() {
        let mut form = ItemForm::default();
        assert!(form.set("is_available", "on".to_string()));
        assert!(form.set("is_featured", "off".to_string()));
        assert!(!form.set("csrf_token", "x".to_string()));
        assert!(form.is_available);
        assert!(!form.is_featured);
    }

    #[test]
    fn test_deserialize_row_with_join_and_nulls() {
        let category_id = Uuid::new_v4();
        let row = json!({
            "id": Uuid::new_v4(),
            "name_tr": "Pirzola",
            "name_en": null,
            "description_tr": "Izgara kuzu",
            "price": 450,
            "category_id": category_id,
            "image": "/static/delicious-food.svg",
            "gallery_images": null,
            "calories": 610,
            "protein_g": null,
            "is_available": true,
            "display_order": 4,
            "categories": { "id": category_id, "name_tr": "Ana Yemekler", "name_en": "Main Courses" }
        });

        let item: MenuItem = serde_json::from_value(row).unwrap();
        assert_eq!(item.name_en, None);
        assert_eq!(item.price, Decimal::from(450));
        assert!(item.gallery().is_empty());
        assert_eq!(item.nutrition.calories, Some(610));
        assert!(!item.is_featured);
        assert_eq!(item.category.unwrap().name_tr, "Ana Yemekler");
    }

    #[test]
    fn test_draft_serializes_flat_nutrition() {
        let input = filled_form(Uuid::new_v4()).into_input().unwrap();
        let draft = MenuItemDraft::new(input, "/static/delicious-food.svg".to_string(), 7);
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["display_order"], 7);
        assert_eq!(value["is_available"], true);
        assert_eq!(value["is_featured"], false);
        assert!(value.get("calories").is_some());
        assert!(value.get("nutrition").is_none());
    }
}
