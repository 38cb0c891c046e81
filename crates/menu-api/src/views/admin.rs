// ============================================================================
// Menu API - Admin Page Models
// File: crates/menu-api/src/views/admin.rs
// Description: Dashboard, item/category dialogs, login and setup pages
// ============================================================================

use serde::Serialize;
use uuid::Uuid;

use menu_core::domain::{format_price, Category, FormMode, ItemForm, ImageSelection, MenuCatalog, MenuItem};

use super::urls::admin_url;
use super::Chrome;

/// Which dialog the dashboard shows, as requested through the query string
#[derive(Debug, Clone, Default)]
pub enum Dialog {
    #[default]
    Closed,
    NewItem(Option<ItemDraft>),
    EditItem(Uuid, Option<ItemDraft>),
    ManageCategories,
    EditCategory(Uuid),
}

/// Values of a rejected item submission, shown again in the open dialog
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub form: ItemForm,
    pub selection: ImageSelection,
}

#[derive(Debug, Default, Serialize)]
pub struct ItemFormView {
    pub name_tr: String,
    pub name_en: String,
    pub description_tr: String,
    pub description_en: String,
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
    pub price: String,
    pub category_id: String,
    pub image: String,
    pub is_available: bool,
    pub is_featured: bool,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl From<&MenuItem> for ItemFormView {
    fn from(item: &MenuItem) -> Self {
        Self {
            name_tr: item.name_tr.clone(),
            name_en: text(&item.name_en),
            description_tr: item.description_tr.clone(),
            description_en: text(&item.description_en),
            ingredients_tr: text(&item.ingredients_tr),
            ingredients_en: text(&item.ingredients_en),
            allergens_tr: text(&item.allergens_tr),
            allergens_en: text(&item.allergens_en),
            chef_recommendation_tr: text(&item.chef_recommendation_tr),
            chef_recommendation_en: text(&item.chef_recommendation_en),
            calories: number(item.nutrition.calories),
            protein_g: number(item.nutrition.protein_g),
            carbs_g: number(item.nutrition.carbs_g),
            fat_g: number(item.nutrition.fat_g),
            price: format_price(&item.price),
            category_id: item.category_id.to_string(),
            image: text(&item.image),
            is_available: item.is_available,
            is_featured: item.is_featured,
        }
    }
}

impl From<&ItemForm> for ItemFormView {
    fn from(form: &ItemForm) -> Self {
        Self {
            name_tr: form.name_tr.clone(),
            name_en: form.name_en.clone(),
            description_tr: form.description_tr.clone(),
            description_en: form.description_en.clone(),
            ingredients_tr: form.ingredients_tr.clone(),
            ingredients_en: form.ingredients_en.clone(),
            allergens_tr: form.allergens_tr.clone(),
            allergens_en: form.allergens_en.clone(),
            chef_recommendation_tr: form.chef_recommendation_tr.clone(),
            chef_recommendation_en: form.chef_recommendation_en.clone(),
            calories: form.calories.clone(),
            protein_g: form.protein_g.clone(),
            carbs_g: form.carbs_g.clone(),
            fat_g: form.fat_g.clone(),
            price: form.price.clone(),
            category_id: form.category_id.clone(),
            image: form.image.clone(),
            is_available: form.is_available,
            is_featured: form.is_featured,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub id: Uuid,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct ItemDialogView {
    pub editing: bool,
    pub action: String,
    pub cancel_url: String,
    pub form: ItemFormView,
    pub categories: Vec<CategoryOption>,
    /// Image shown above the file input: pending upload, else the stored image
    pub preview: Option<String>,
    /// Accepted upload carried to the next submission
    pub image_inline: Option<String>,
}

impl ItemDialogView {
    fn build(
        catalog: &MenuCatalog,
        target: FormMode<'_, MenuItem>,
        draft: Option<&ItemDraft>,
        tab: Option<Uuid>,
    ) -> Self {
        let editing = target.target();
        let mut form = match (draft, editing) {
            (Some(draft), _) => ItemFormView::from(&draft.form),
            (None, Some(item)) => ItemFormView::from(item),
            (None, None) => ItemFormView {
                is_available: true,
                ..ItemFormView::default()
            },
        };
        if form.category_id.is_empty() {
            form.category_id = tab.map(|id| id.to_string()).unwrap_or_default();
        }

        let image_inline = draft.and_then(|d| d.selection.inline()).map(str::to_string);
        let preview = image_inline
            .clone()
            .or_else(|| editing.and_then(|item| item.image.clone()))
            .filter(|src| !src.trim().is_empty());

        let categories = catalog
            .categories
            .iter()
            .map(|c| CategoryOption {
                id: c.id,
                name: c.name_tr.clone(),
                selected: form.category_id == c.id.to_string(),
            })
            .collect();

        Self {
            editing: editing.is_some(),
            action: match editing {
                Some(item) => format!("/admin/items/{}", item.id),
                None => "/admin/items".to_string(),
            },
            cancel_url: admin_url(tab, None),
            form,
            categories,
            preview,
            image_inline,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name_tr: String,
    pub name_en: String,
    pub item_count: usize,
    pub edit_url: String,
    pub delete_action: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryDialogView {
    pub editing: bool,
    pub action: String,
    pub cancel_url: String,
    pub manage_url: String,
    pub name_tr: String,
    pub name_en: String,
    pub rows: Vec<CategoryRow>,
}

impl CategoryDialogView {
    fn build(catalog: &MenuCatalog, target: FormMode<'_, Category>, tab: Option<Uuid>) -> Self {
        let rows = catalog
            .categories
            .iter()
            .map(|c| CategoryRow {
                id: c.id,
                name_tr: c.name_tr.clone(),
                name_en: text(&c.name_en),
                item_count: catalog.item_count(c.id),
                edit_url: admin_url(tab, Some(("edit_category", c.id.to_string()))),
                delete_action: format!("/admin/categories/{}/delete", c.id),
            })
            .collect();

        let editing = target.target();
        let (action, name_tr, name_en) = match editing {
            Some(c) => (
                format!("/admin/categories/{}", c.id),
                c.name_tr.clone(),
                text(&c.name_en),
            ),
            None => ("/admin/categories".to_string(), String::new(), String::new()),
        };

        Self {
            editing: editing.is_some(),
            action,
            cancel_url: admin_url(tab, None),
            manage_url: admin_url(tab, Some(("manage_categories", "1".to_string()))),
            name_tr,
            name_en,
            rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminTab {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct AdminItemRow {
    pub id: Uuid,
    pub name_tr: String,
    pub description_tr: String,
    pub ingredients_tr: String,
    pub allergens_tr: String,
    pub chef_recommendation_tr: String,
    pub price: String,
    pub image: Option<String>,
    pub is_available: bool,
    pub is_featured: bool,
    pub edit_url: String,
    pub delete_action: String,
}

#[derive(Debug, Serialize)]
pub struct AdminPage {
    pub chrome: Chrome,
    pub csrf_token: String,
    pub user_email: Option<String>,
    /// Active tab id for hidden form fields, empty when there are no categories
    pub tab: String,
    pub new_item_url: String,
    pub manage_categories_url: String,
    pub tabs: Vec<AdminTab>,
    pub items: Vec<AdminItemRow>,
    pub item_dialog: Option<ItemDialogView>,
    pub category_dialog: Option<CategoryDialogView>,
}

impl AdminPage {
    pub fn build(
        catalog: &MenuCatalog,
        chrome: Chrome,
        csrf_token: &str,
        user_email: Option<&str>,
        requested_tab: Option<Uuid>,
        dialog: &Dialog,
    ) -> Self {
        let tab = catalog.resolve_active(requested_tab);

        let tabs = catalog
            .categories
            .iter()
            .map(|c| AdminTab {
                id: c.id,
                name: c.name_tr.clone(),
                url: admin_url(Some(c.id), None),
                active: Some(c.id) == tab,
            })
            .collect();

        let items = tab
            .map(|id| {
                catalog
                    .items_for_category(id)
                    .map(|item| AdminItemRow {
                        id: item.id,
                        name_tr: item.name_tr.clone(),
                        description_tr: item.description_tr.clone(),
                        ingredients_tr: text(&item.ingredients_tr),
                        allergens_tr: text(&item.allergens_tr),
                        chef_recommendation_tr: text(&item.chef_recommendation_tr),
                        price: format_price(&item.price),
                        image: item.image.clone(),
                        is_available: item.is_available,
                        is_featured: item.is_featured,
                        edit_url: admin_url(tab, Some(("edit_item", item.id.to_string()))),
                        delete_action: format!("/admin/items/{}/delete", item.id),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let item_dialog = match dialog {
            Dialog::NewItem(draft) => Some(ItemDialogView::build(catalog, FormMode::Creating, draft.as_ref(), tab)),
            Dialog::EditItem(id, draft) => catalog
                .item(*id)
                .map(|item| ItemDialogView::build(catalog, FormMode::Editing(item), draft.as_ref(), tab)),
            _ => None,
        };

        let category_dialog = match dialog {
            Dialog::ManageCategories => Some(CategoryDialogView::build(catalog, FormMode::Creating, tab)),
            Dialog::EditCategory(id) => Some(CategoryDialogView::build(catalog, catalog.category(*id).into(), tab)),
            _ => None,
        };

        Self {
            chrome,
            csrf_token: csrf_token.to_string(),
            user_email: user_email.map(str::to_string),
            tab: tab.map(|id| id.to_string()).unwrap_or_default(),
            new_item_url: admin_url(tab, Some(("new_item", "1".to_string()))),
            manage_categories_url: admin_url(tab, Some(("manage_categories", "1".to_string()))),
            tabs,
            items,
            item_dialog,
            category_dialog,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub chrome: Chrome,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SetupStep {
    pub step: usize,
    pub script: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SetupPage {
    pub chrome: Chrome,
    pub steps: Vec<SetupStep>,
}

const SETUP_SCRIPTS: [&str; 3] = [
    "scripts/01_create_tables.sql",
    "scripts/02_seed_data.sql",
    "scripts/03_add_turkish_support.sql",
];

impl SetupPage {
    pub fn new(chrome: Chrome) -> Self {
        Self {
            chrome,
            steps: SETUP_SCRIPTS
                .iter()
                .enumerate()
                .map(|(i, script)| SetupStep { step: i + 1, script: *script })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::{Language, NutritionFacts};
    use rust_decimal::Decimal;

    fn category(name_tr: &str, order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            name_tr: name_tr.to_string(),
            name_en: None,
            subtitle_tr: None,
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
            ingredients_tr: Some("kuzu".to_string()),
            ingredients_en: None,
            allergens_tr: None,
            allergens_en: None,
            chef_recommendation_tr: None,
            chef_recommendation_en: None,
            price: Decimal::new(45050, 2),
            category_id,
            image: Some("/img/pirzola.png".to_string()),
            gallery_images: None,
            nutrition: NutritionFacts {
                calories: Some(520),
                ..NutritionFacts::default()
            },
            is_available: false,
            is_featured: true,
            display_order: 1,
            created_at: None,
            updated_at: None,
            category: None,
        }
    }

    fn chrome() -> Chrome {
        Chrome::new("Yönetici Paneli", "Prime Steakhouse", Language::Tr, None)
    }

    #[test]
    fn test_dashboard_lists_active_tab_items_only() {
        let mains = category("Ana Yemekler", 1);
        let desserts = category("Tatlılar", 2);
        let catalog = MenuCatalog::new(
            vec![mains.clone(), desserts.clone()],
            vec![item("Pirzola", mains.id), item("Künefe", desserts.id)],
        );

        let page = AdminPage::build(&catalog, chrome(), "tok", None, Some(desserts.id), &Dialog::Closed);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name_tr, "Künefe");
        assert!(page.tabs[1].active);
        assert_eq!(page.tab, desserts.id.to_string());
        assert!(page.item_dialog.is_none());
    }

    #[test]
    fn test_edit_dialog_prefills_item() {
        let mains = category("Ana Yemekler", 1);
        let dish = item("Pirzola", mains.id);
        let catalog = MenuCatalog::new(vec![mains.clone()], vec![dish.clone()]);

        let page = AdminPage::build(&catalog, chrome(), "tok", None, None, &Dialog::EditItem(dish.id, None));
        let dialog = page.item_dialog.unwrap();
        assert!(dialog.editing);
        assert_eq!(dialog.action, format!("/admin/items/{}", dish.id));
        assert_eq!(dialog.form.price, "450.5");
        assert_eq!(dialog.form.calories, "520");
        assert!(!dialog.form.is_available);
        assert_eq!(dialog.preview.as_deref(), Some("/img/pirzola.png"));
        assert!(dialog.categories[0].selected);
    }

    #[test]
    fn test_new_item_dialog_keeps_rejected_values() {
        let mains = category("Ana Yemekler", 1);
        let catalog = MenuCatalog::new(vec![mains.clone()], vec![]);
        let mut form = ItemForm::default();
        form.name_tr = "Pirzola".to_string();

        let page = AdminPage::build(
            &catalog,
            chrome(),
            "tok",
            None,
            None,
            &Dialog::NewItem(Some(ItemDraft { form, selection: ImageSelection::default() })),
        );
        let dialog = page.item_dialog.unwrap();
        assert!(!dialog.editing);
        assert_eq!(dialog.action, "/admin/items");
        assert_eq!(dialog.form.name_tr, "Pirzola");
        assert_eq!(dialog.form.category_id, mains.id.to_string());
        assert!(dialog.preview.is_none());
    }

    #[test]
    fn test_unknown_edit_targets() {
        let mains = category("Ana Yemekler", 1);
        let catalog = MenuCatalog::new(vec![mains.clone()], vec![item("Pirzola", mains.id)]);

        let page = AdminPage::build(&catalog, chrome(), "tok", None, None, &Dialog::EditItem(Uuid::new_v4(), None));
        assert!(page.item_dialog.is_none());

        let page = AdminPage::build(&catalog, chrome(), "tok", None, None, &Dialog::EditCategory(Uuid::new_v4()));
        let dialog = page.category_dialog.unwrap();
        assert!(!dialog.editing);
        assert_eq!(dialog.rows[0].item_count, 1);
    }

    #[test]
    fn test_setup_page_numbers_steps() {
        let page = SetupPage::new(chrome());
        assert_eq!(page.steps.len(), 3);
        assert_eq!(page.steps[2].step, 3);
    }
}
