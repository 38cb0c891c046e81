//! Language-resolved views of catalog entities, ready for rendering

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::category::Category;
use super::language::{localized, localized_opt, split_list, Language};
use super::menu_item::{MenuItem, NutritionFacts};

pub fn format_price(price: &Decimal) -> String {
    price.normalize().to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedCategory {
    pub id: Uuid,
    pub name: String,
    pub subtitle: String,
}

impl LocalizedCategory {
    pub fn new(category: &Category, lang: Language) -> Self {
        Self {
            id: category.id,
            name: category.name(lang).to_string(),
            subtitle: category.subtitle(lang).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub chef_recommendation: Option<String>,
    pub nutrition: Option<NutritionFacts>,
    pub is_featured: bool,
}

impl LocalizedItem {
    pub fn new(item: &MenuItem, lang: Language, placeholder: &str) -> Self {
        Self {
            id: item.id,
            name: localized(&item.name_tr, item.name_en.as_deref(), lang).to_string(),
            description: localized(&item.description_tr, item.description_en.as_deref(), lang).to_string(),
            price: format_price(&item.price),
            image: item.image_or(placeholder).to_string(),
            ingredients: split_list(localized_opt(
                item.ingredients_tr.as_deref(),
                item.ingredients_en.as_deref(),
                lang,
            )),
            allergens: split_list(localized_opt(
                item.allergens_tr.as_deref(),
                item.allergens_en.as_deref(),
                lang,
            )),
            chef_recommendation: localized_opt(
                item.chef_recommendation_tr.as_deref(),
                item.chef_recommendation_en.as_deref(),
                lang,
            )
            .map(str::to_string),
            nutrition: Some(item.nutrition.clone()).filter(|n| !n.is_empty()),
            is_featured: item.is_featured,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CarouselThumb {
    pub index: usize,
    pub src: String,
    pub active: bool,
}

/// Detail-page gallery: one main image plus thumbnails when the gallery has several
#[derive(Debug, Clone, Serialize)]
pub struct ImageCarousel {
    pub current: String,
    pub index: usize,
    pub previous: usize,
    pub next: usize,
    pub thumbnails: Vec<CarouselThumb>,
}

impl ImageCarousel {
    pub fn new(item: &MenuItem, requested: usize, placeholder: &str) -> Self {
        let gallery = item.gallery();
        let len = gallery.len();
        let index = if len == 0 { 0 } else { requested.min(len - 1) };
        let current = gallery
            .get(index)
            .filter(|src| !src.trim().is_empty())
            .map(String::as_str)
            .unwrap_or_else(|| item.image_or(placeholder))
            .to_string();

        let thumbnails = if len > 1 {
            gallery
                .iter()
                .enumerate()
                .map(|(i, src)| CarouselThumb {
                    index: i,
                    src: if src.trim().is_empty() { placeholder.to_string() } else { src.clone() },
                    active: i == index,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            current,
            index,
            previous: if len == 0 { 0 } else { (index + len - 1) % len },
            next: if len == 0 { 0 } else { (index + 1) % len },
            thumbnails,
        }
    }
}
