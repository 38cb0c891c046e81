// ============================================================================
// Menu API - Public Page Models
// File: crates/menu-api/src/views/public.rs
// Description: Landing page, menu listing and item detail
// ============================================================================

use serde::Serialize;
use uuid::Uuid;

use menu_core::domain::{ImageCarousel, Language, LocalizedCategory, LocalizedItem, MenuCatalog, MenuItem};
use menu_shared::config::{LandingSettings, MenuSettings};

use super::urls::page_url;
use super::Chrome;
use crate::flash::Toast;

#[derive(Debug, Serialize)]
pub struct ItemCard {
    pub item: LocalizedItem,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub chrome: Chrome,
    pub menu_url: String,
    pub toggle_url: String,
    pub show_featured: bool,
    pub show_reservation: bool,
    pub show_admin_link: bool,
    pub featured: Vec<ItemCard>,
}

pub fn landing_page(
    featured: &[MenuItem],
    lang: Language,
    landing: &LandingSettings,
    menu: &MenuSettings,
    toast: Option<Toast>,
) -> LandingPage {
    let lang_param = Some(lang.as_str().to_string());
    let featured = featured
        .iter()
        .map(|item| ItemCard {
            item: LocalizedItem::new(item, lang, &menu.placeholder_image),
            url: page_url(&format!("/menu/items/{}", item.id), &[("lang", lang_param.clone())]),
        })
        .collect::<Vec<_>>();

    LandingPage {
        chrome: Chrome::new(&menu.restaurant_name, &menu.restaurant_name, lang, toast),
        menu_url: page_url("/menu", &[("lang", lang_param)]),
        toggle_url: page_url("/", &[("lang", Some(lang.toggled().as_str().to_string()))]),
        show_featured: landing.show_featured && !featured.is_empty(),
        show_reservation: landing.show_reservation,
        show_admin_link: landing.show_admin_link,
        featured,
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTab {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct MenuPage {
    pub chrome: Chrome,
    pub toggle_url: String,
    pub empty: bool,
    pub tabs: Vec<CategoryTab>,
    pub active_category: Option<LocalizedCategory>,
    pub items: Vec<ItemCard>,
}

pub fn menu_page(
    catalog: &MenuCatalog,
    lang: Language,
    requested: Option<Uuid>,
    menu: &MenuSettings,
    toast: Option<Toast>,
) -> MenuPage {
    let active = catalog.resolve_active(requested);
    let lang_param = Some(lang.as_str().to_string());
    let category_param = active.map(|id| id.to_string());

    let tabs = catalog
        .categories
        .iter()
        .map(|c| CategoryTab {
            id: c.id,
            name: c.name(lang).to_string(),
            url: page_url("/menu", &[("lang", lang_param.clone()), ("category", Some(c.id.to_string()))]),
            active: Some(c.id) == active,
        })
        .collect();

    let items = active
        .map(|id| {
            catalog
                .items_for_category(id)
                .map(|item| ItemCard {
                    item: LocalizedItem::new(item, lang, &menu.placeholder_image),
                    url: page_url(
                        &format!("/menu/items/{}", item.id),
                        &[("lang", lang_param.clone()), ("category", category_param.clone())],
                    ),
                })
                .collect()
        })
        .unwrap_or_default();

    let page_title = if lang == Language::En { "Menu" } else { "Menü" };

    MenuPage {
        chrome: Chrome::new(page_title, &menu.restaurant_name, lang, toast),
        toggle_url: page_url(
            "/menu",
            &[("lang", Some(lang.toggled().as_str().to_string())), ("category", category_param)],
        ),
        empty: catalog.is_empty(),
        tabs,
        active_category: active
            .and_then(|id| catalog.category(id))
            .map(|c| LocalizedCategory::new(c, lang)),
        items,
    }
}

#[derive(Debug, Serialize)]
pub struct Thumbnail {
    pub src: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct CarouselView {
    pub current: String,
    pub has_thumbnails: bool,
    pub previous_url: String,
    pub next_url: String,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Serialize)]
pub struct ItemPage {
    pub chrome: Chrome,
    pub item: LocalizedItem,
    pub carousel: CarouselView,
    pub back_url: String,
    pub toggle_url: String,
}

pub fn item_page(
    item: &MenuItem,
    lang: Language,
    image: usize,
    category: Option<Uuid>,
    menu: &MenuSettings,
) -> ItemPage {
    let localized = LocalizedItem::new(item, lang, &menu.placeholder_image);
    let carousel = ImageCarousel::new(item, image, &menu.placeholder_image);
    let path = format!("/menu/items/{}", item.id);
    let category_param = category.map(|id| id.to_string());

    let image_url = |lang: Language, index: usize| {
        page_url(
            &path,
            &[
                ("lang", Some(lang.as_str().to_string())),
                ("category", category_param.clone()),
                ("image", Some(index.to_string())),
            ],
        )
    };

    let view = CarouselView {
        has_thumbnails: !carousel.thumbnails.is_empty(),
        previous_url: image_url(lang, carousel.previous),
        next_url: image_url(lang, carousel.next),
        thumbnails: carousel
            .thumbnails
            .iter()
            .map(|thumb| Thumbnail {
                src: thumb.src.clone(),
                url: image_url(lang, thumb.index),
                active: thumb.active,
            })
            .collect(),
        current: carousel.current,
    };

    ItemPage {
        chrome: Chrome::new(&localized.name, &menu.restaurant_name, lang, None),
        back_url: page_url(
            "/menu",
            &[("lang", Some(lang.as_str().to_string())), ("category", category_param.clone())],
        ),
        toggle_url: image_url(lang.toggled(), carousel.index),
        carousel: view,
        item: localized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::{Category, NutritionFacts};
    use menu_shared::config::AppConfig;
    use rust_decimal::Decimal;

    fn settings() -> MenuSettings {
        AppConfig::from_toml("").unwrap().menu
    }

    fn category(name_tr: &str, name_en: Option<&str>, order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            name_tr: name_tr.to_string(),
            name_en: name_en.map(str::to_string),
            subtitle_tr: Some(format!("Özenle hazırlanmış {}", name_tr.to_lowercase())),
            subtitle_en: None,
            display_order: order,
            created_at: None,
            updated_at: None,
        }
    }

    fn item(name_tr: &str, category_id: Uuid) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name_tr: name_tr.to_string(),
            name_en: None,
            description_tr: "Izgara".to_string(),
            description_en: None,
            ingredients_tr: Some("kuzu, tuz".to_string()),
            ingredients_en: None,
            allergens_tr: None,
            allergens_en: None,
            chef_recommendation_tr: None,
            chef_recommendation_en: None,
            price: Decimal::from(450),
            category_id,
            image: None,
            gallery_images: None,
            nutrition: NutritionFacts::default(),
            is_available: true,
            is_featured: true,
            display_order: 1,
            created_at: None,
            updated_at: None,
            category: None,
        }
    }

    #[test]
    fn test_menu_defaults_to_first_tab() {
        let mains = category("Ana Yemekler", Some("Main Courses"), 1);
        let desserts = category("Tatlılar", None, 2);
        let dish = item("Pirzola", mains.id);
        let catalog = MenuCatalog::new(vec![mains.clone(), desserts], vec![dish]);

        let page = menu_page(&catalog, Language::En, None, &settings(), None);
        assert!(page.tabs[0].active);
        assert_eq!(page.tabs[0].name, "Main Courses");
        assert_eq!(page.tabs[1].name, "Tatlılar");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].item.image, "/static/delicious-food.svg");
        assert_eq!(page.toggle_url, format!("/menu?lang=tr&category={}", mains.id));
    }

    #[test]
    fn test_empty_category_and_empty_catalog() {
        let mains = category("Ana Yemekler", None, 1);
        let catalog = MenuCatalog::new(vec![mains.clone()], vec![]);
        let page = menu_page(&catalog, Language::Tr, Some(mains.id), &settings(), None);
        assert!(!page.empty);
        assert!(page.items.is_empty());

        let page = menu_page(&MenuCatalog::default(), Language::Tr, None, &settings(), None);
        assert!(page.empty);
        assert!(page.active_category.is_none());
    }

    #[test]
    fn test_item_page_links_keep_state() {
        let category_id = Uuid::new_v4();
        let mut dish = item("Pirzola", category_id);
        dish.gallery_images = Some(vec!["/a.png".into(), "/b.png".into()]);

        let page = item_page(&dish, Language::Tr, 1, Some(category_id), &settings());
        assert_eq!(page.carousel.current, "/b.png");
        assert!(page.carousel.has_thumbnails);
        assert!(page.carousel.next_url.ends_with("image=0"));
        assert_eq!(page.back_url, format!("/menu?lang=tr&category={}", category_id));
        assert!(page.toggle_url.contains("lang=en"));
    }

    #[test]
    fn test_landing_hides_featured_when_none() {
        let mut landing = AppConfig::from_toml("").unwrap().landing;
        landing.show_featured = true;

        let page = landing_page(&[], Language::Tr, &landing, &settings(), None);
        assert!(!page.show_featured);

        let dish = item("Pirzola", Uuid::new_v4());
        let page = landing_page(&[dish], Language::Tr, &landing, &settings(), None);
        assert!(page.show_featured);
        assert!(page.featured[0].url.starts_with("/menu/items/"));
    }
}
