use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::warn;

use menu_core::domain::Language;
use menu_shared::types::parse_id;

use crate::error::ApiError;
use crate::flash::take_toast;
use crate::state::AppState;
use crate::views::public::{item_page, landing_page, menu_page};

/// Page state carried in the query string
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub lang: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl MenuQuery {
    fn category(&self) -> Option<uuid::Uuid> {
        self.category.as_deref().and_then(parse_id)
    }

    fn image(&self) -> usize {
        self.image
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}

pub async fn landing(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<MenuQuery>,
) -> Result<Html<String>, ApiError> {
    let settings = &state.config.landing;
    let default = settings
        .language
        .parse::<Language>()
        .unwrap_or_else(|_| state.default_language());
    let lang = Language::from_query(query.lang.as_deref(), default);

    let featured = if settings.show_featured {
        state.menu_service().featured_items().await.unwrap_or_else(|e| {
            warn!("Featured items unavailable: {}", e);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    let page = landing_page(&featured, lang, settings, &state.config.menu, take_toast(&cookies));
    state.views.render("landing", &page)
}

pub async fn menu(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<MenuQuery>,
) -> Result<Html<String>, ApiError> {
    let lang = state.language(query.lang.as_deref());
    let catalog = state.menu_service().load_public_menu().await?;

    let page = menu_page(&catalog, lang, query.category(), &state.config.menu, take_toast(&cookies));
    state.views.render("menu", &page)
}

pub async fn item_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MenuQuery>,
) -> Result<Html<String>, ApiError> {
    let id = parse_id(&id).ok_or_else(|| ApiError::NotFound(format!("menu item {}", id)))?;
    let lang = state.language(query.lang.as_deref());
    let item = state.menu_service().find_item(&id).await?;

    let page = item_page(&item, lang, query.image(), query.category(), &state.config.menu);
    state.views.render("item", &page)
}
