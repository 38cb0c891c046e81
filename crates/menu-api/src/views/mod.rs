//! Server-rendered pages: template registry and page view models

pub mod admin;
pub mod public;
pub mod urls;

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use menu_core::domain::Language;
use menu_shared::AppError;

use crate::error::ApiError;
use crate::flash::Toast;

const TEMPLATES: [(&str, &str); 7] = [
    ("layout", include_str!("../../templates/layout.hbs")),
    ("landing", include_str!("../../templates/landing.hbs")),
    ("menu", include_str!("../../templates/menu.hbs")),
    ("item", include_str!("../../templates/item.hbs")),
    ("login", include_str!("../../templates/login.hbs")),
    ("admin", include_str!("../../templates/admin.hbs")),
    ("setup", include_str!("../../templates/setup.hbs")),
];

/// Compiled templates, shared read-only across requests
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| AppError::TemplateError(format!("{}: {}", name, e)))?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, page: &T) -> Result<Html<String>, ApiError> {
        Ok(Html(self.registry.render(name, page)?))
    }
}

/// Fields the shared layout reads on every page
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub page_title: String,
    pub restaurant_name: String,
    pub lang: &'static str,
    pub en: bool,
    pub toast: Option<Toast>,
}

impl Chrome {
    pub fn new(page_title: &str, restaurant_name: &str, lang: Language, toast: Option<Toast>) -> Self {
        Self {
            page_title: page_title.to_string(),
            restaurant_name: restaurant_name.to_string(),
            lang: lang.as_str(),
            en: lang == Language::En,
            toast,
        }
    }
}
