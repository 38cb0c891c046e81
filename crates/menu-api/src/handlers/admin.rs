// ============================================================================
// Menu API - Admin Handlers
// File: crates/menu-api/src/handlers/admin.rs
// Description: Dashboard page and menu content mutations (post/redirect/get)
// ============================================================================

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::{debug, error, warn};
use uuid::Uuid;

use menu_core::domain::{CategoryForm, ImagePolicy, ImageSelection, ImageUpload, ItemForm, Language, MenuCatalog};
use menu_core::error::DomainError;
use menu_core::services::DashboardLoad;
use menu_shared::{types::parse_id, utils::non_empty};

use crate::error::ApiError;
use crate::flash::{redirect_with, take_toast, Toast};
use crate::middleware::{clear_session_cookie, AdminSession};
use crate::state::AppState;
use crate::views::admin::{AdminPage, Dialog, ItemDraft, SetupPage};
use crate::views::urls::admin_url;
use crate::views::Chrome;

/// Dashboard state carried in the query string
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub tab: Option<String>,
    pub new_item: Option<String>,
    pub edit_item: Option<String>,
    pub edit_category: Option<String>,
    pub manage_categories: Option<String>,
}

impl AdminQuery {
    fn tab(&self) -> Option<Uuid> {
        self.tab.as_deref().and_then(parse_id)
    }

    fn dialog(&self) -> Dialog {
        if let Some(id) = self.edit_item.as_deref().and_then(parse_id) {
            Dialog::EditItem(id, None)
        } else if self.new_item.is_some() {
            Dialog::NewItem(None)
        } else if let Some(id) = self.edit_category.as_deref().and_then(parse_id) {
            Dialog::EditCategory(id)
        } else if self.manage_categories.is_some() {
            Dialog::ManageCategories
        } else {
            Dialog::Closed
        }
    }
}

/// Url-encoded forms posted from the dashboard (category add/edit, deletes)
#[derive(Debug, Default, Deserialize)]
pub struct DashboardForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub tab: String,
    #[serde(default)]
    pub name_tr: String,
    #[serde(default)]
    pub name_en: String,
}

impl DashboardForm {
    fn tab(&self) -> Option<Uuid> {
        parse_id(&self.tab)
    }

    fn category(&self) -> CategoryForm {
        CategoryForm {
            name_tr: self.name_tr.clone(),
            name_en: self.name_en.clone(),
        }
    }
}

/// Multipart item form: text fields, the carried inline image and a new upload
#[derive(Debug, Default)]
struct ItemSubmission {
    csrf_token: String,
    tab: Option<Uuid>,
    form: ItemForm,
    image_inline: Option<String>,
    upload: Option<ImageUpload>,
}

impl ItemSubmission {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut submission = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "image_file" {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec();
                let upload = ImageUpload { file_name, content_type, bytes };
                if !upload.is_empty() {
                    submission.upload = Some(upload);
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Invalid field {}: {}", name, e)))?;
            match name.as_str() {
                "csrf_token" => submission.csrf_token = value,
                "tab" => submission.tab = parse_id(&value),
                "image_inline" => submission.image_inline = non_empty(&value),
                _ => {
                    if !submission.form.set(&name, value) {
                        debug!("Ignoring unknown item field: {}", name);
                    }
                }
            }
        }

        Ok(submission)
    }

    /// Image for this submission. A rejected upload keeps the carried image.
    fn image_selection(&mut self, policy: &ImagePolicy) -> (ImageSelection, Option<DomainError>) {
        let mut selection = ImageSelection::default();
        if let Some(inline) = self.image_inline.take() {
            if let Err(e) = selection.restore(&inline, policy) {
                warn!("Discarding carried image: {}", e);
            }
        }

        let rejected = self
            .upload
            .take()
            .and_then(|upload| selection.select(upload, policy).err());
        (selection, rejected)
    }
}

fn log_failure(action: &str, err: &DomainError) {
    if err.is_validation() {
        warn!("{} rejected: {}", action, err);
    } else {
        error!("{} failed: {}", action, err);
    }
}

/// Drop the session and send the admin back to the login page
fn session_expired(state: &AppState, cookies: &Cookies) -> Response {
    clear_session_cookie(cookies, &state.config.auth);
    redirect_with(
        cookies,
        "/auth/login",
        Toast::for_error(&DomainError::SessionExpired, "Lütfen tekrar giriş yapın"),
    )
}

async fn render_dashboard(
    state: &AppState,
    cookies: &Cookies,
    admin: &AdminSession,
    tab: Option<Uuid>,
    dialog: Dialog,
    mut toast: Option<Toast>,
) -> Result<Response, ApiError> {
    let restaurant = &state.config.menu.restaurant_name;
    let service = state.admin_service(&admin.session.access_token);

    let catalog = match service.load_dashboard().await {
        Ok(DashboardLoad::Ready(catalog)) => catalog,
        Ok(DashboardLoad::NotProvisioned) => {
            let page = SetupPage::new(Chrome::new("Veritabanı Kurulumu", restaurant, Language::Tr, toast));
            return Ok(state.views.render("setup", &page)?.into_response());
        }
        Err(DomainError::SessionExpired) => return Ok(session_expired(state, cookies)),
        Err(e) => {
            error!("Failed to load dashboard: {}", e);
            toast = Some(Toast::error("Hata", "Menü verileri yüklenemedi"));
            MenuCatalog::default()
        }
    };

    let chrome = Chrome::new("Yönetici Paneli", restaurant, Language::Tr, toast);
    let page = AdminPage::build(
        &catalog,
        chrome,
        &admin.csrf_token,
        admin.user.email.as_deref(),
        tab,
        &dialog,
    );
    Ok(state.views.render("admin", &page)?.into_response())
}

fn path_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound(format!("unknown id {}", raw)))
}

pub async fn dashboard(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    Query(query): Query<AdminQuery>,
) -> Result<Response, ApiError> {
    let toast = take_toast(&cookies);
    render_dashboard(&state, &cookies, &admin, query.tab(), query.dialog(), toast).await
}

pub async fn create_item(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut submission = ItemSubmission::read(multipart).await?;
    admin.verify_csrf(&state.csrf, &submission.csrf_token)?;

    let service = state.admin_service(&admin.session.access_token);
    let tab = submission.tab;
    let (selection, rejected) = submission.image_selection(service.image_policy());

    let result = match rejected {
        Some(e) => Err(e),
        None => service.create_item(submission.form.clone(), &selection).await,
    };

    match result {
        Ok(_) => Ok(redirect_with(
            &cookies,
            &admin_url(tab, None),
            Toast::success("Menü öğesi başarıyla eklendi"),
        )),
        Err(DomainError::SessionExpired) => Ok(session_expired(&state, &cookies)),
        Err(e) => {
            log_failure("Menu item create", &e);
            let toast = Toast::for_error(&e, "Menü öğesi eklenemedi");
            let draft = ItemDraft { form: submission.form, selection };
            render_dashboard(&state, &cookies, &admin, tab, Dialog::NewItem(Some(draft)), Some(toast)).await
        }
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let id = path_id(&id)?;
    let mut submission = ItemSubmission::read(multipart).await?;
    admin.verify_csrf(&state.csrf, &submission.csrf_token)?;

    let service = state.admin_service(&admin.session.access_token);
    let tab = submission.tab;
    let (selection, rejected) = submission.image_selection(service.image_policy());

    let result = match rejected {
        Some(e) => Err(e),
        None => service.update_item(&id, submission.form.clone(), &selection).await,
    };

    match result {
        Ok(_) => Ok(redirect_with(
            &cookies,
            &admin_url(tab, None),
            Toast::success("Menü öğesi başarıyla güncellendi"),
        )),
        Err(DomainError::SessionExpired) => Ok(session_expired(&state, &cookies)),
        Err(e) => {
            log_failure("Menu item update", &e);
            let toast = Toast::for_error(&e, "Menü öğesi güncellenemedi");
            let draft = ItemDraft { form: submission.form, selection };
            render_dashboard(&state, &cookies, &admin, tab, Dialog::EditItem(id, Some(draft)), Some(toast)).await
        }
    }
}

pub async fn delete_item(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<DashboardForm>,
) -> Result<Response, ApiError> {
    let id = path_id(&id)?;
    admin.verify_csrf(&state.csrf, &form.csrf_token)?;

    let location = admin_url(form.tab(), None);
    match state.admin_service(&admin.session.access_token).delete_item(&id).await {
        Ok(()) => Ok(redirect_with(&cookies, &location, Toast::success("Menü öğesi başarıyla silindi"))),
        Err(DomainError::SessionExpired) => Ok(session_expired(&state, &cookies)),
        Err(e) => {
            log_failure("Menu item delete", &e);
            Ok(redirect_with(&cookies, &location, Toast::for_error(&e, "Menü öğesi silinemedi")))
        }
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    Form(form): Form<DashboardForm>,
) -> Result<Response, ApiError> {
    admin.verify_csrf(&state.csrf, &form.csrf_token)?;

    match state
        .admin_service(&admin.session.access_token)
        .create_category(form.category())
        .await
    {
        Ok(category) => Ok(redirect_with(
            &cookies,
            &admin_url(Some(category.id), None),
            Toast::success("Kategori başarıyla eklendi"),
        )),
        Err(DomainError::SessionExpired) => Ok(session_expired(&state, &cookies)),
        Err(e) => {
            log_failure("Category create", &e);
            Ok(redirect_with(
                &cookies,
                &admin_url(form.tab(), Some(("manage_categories", "1".to_string()))),
                Toast::for_error(&e, "Kategori eklenemedi"),
            ))
        }
    }
}

pub async fn update_category(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<DashboardForm>,
) -> Result<Response, ApiError> {
    let id = path_id(&id)?;
    admin.verify_csrf(&state.csrf, &form.csrf_token)?;

    match state
        .admin_service(&admin.session.access_token)
        .update_category(&id, form.category())
        .await
    {
        Ok(_) => Ok(redirect_with(
            &cookies,
            &admin_url(form.tab(), None),
            Toast::success("Kategori başarıyla güncellendi"),
        )),
        Err(DomainError::SessionExpired) => Ok(session_expired(&state, &cookies)),
        Err(e) => {
            log_failure("Category update", &e);
            Ok(redirect_with(
                &cookies,
                &admin_url(form.tab(), Some(("edit_category", id.to_string()))),
                Toast::for_error(&e, "Kategori güncellenemedi"),
            ))
        }
    }
}

pub async fn delete_category(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
    Form(form): Form<DashboardForm>,
) -> Result<Response, ApiError> {
    let id = path_id(&id)?;
    admin.verify_csrf(&state.csrf, &form.csrf_token)?;

    match state
        .admin_service(&admin.session.access_token)
        .delete_category(&id, form.tab())
        .await
    {
        Ok(next_tab) => Ok(redirect_with(
            &cookies,
            &admin_url(next_tab, Some(("manage_categories", "1".to_string()))),
            Toast::success("Kategori başarıyla silindi"),
        )),
        Err(DomainError::SessionExpired) => Ok(session_expired(&state, &cookies)),
        Err(e) => {
            log_failure("Category delete", &e);
            Ok(redirect_with(
                &cookies,
                &admin_url(form.tab(), Some(("manage_categories", "1".to_string()))),
                Toast::for_error(&e, "Kategori silinemedi"),
            ))
        }
    }
}
