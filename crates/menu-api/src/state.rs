use std::sync::Arc;
use std::time::Duration;

use menu_core::domain::{ImagePolicy, Language};
use menu_core::services::{AdminService, AuthService, MenuService};
use menu_infrastructure::{
    create_http_client, GoTrueIdentityProvider, PostgrestCategoryRepository, PostgrestClient, PostgrestMenuItemRepository,
};
use menu_security::{CsrfGuard, SessionService};
use menu_shared::{config::AppConfig, AppError};

use crate::views::Views;

pub type MenuServiceImpl = MenuService<PostgrestCategoryRepository, PostgrestMenuItemRepository>;
pub type AdminServiceImpl = AdminService<PostgrestCategoryRepository, PostgrestMenuItemRepository>;
pub type AuthServiceImpl = AuthService<GoTrueIdentityProvider>;

/// Application state shared across handlers. Everything in it is read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub postgrest: PostgrestClient,
    pub identity: Arc<GoTrueIdentityProvider>,
    pub sessions: Arc<SessionService>,
    pub csrf: Arc<CsrfGuard>,
    pub views: Arc<Views>,
}

impl AppState {
    /// Wire the backend clients, signing keys and templates for `config`
    pub fn new(config: AppConfig, session_secret: String) -> Result<Self, AppError> {
        let http = create_http_client(Duration::from_secs(config.backend.timeout_seconds))
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let postgrest = PostgrestClient::new(http.clone(), &config.backend.url, &config.backend.anon_key)
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let identity = GoTrueIdentityProvider::new(http, &config.backend.url, &config.backend.anon_key)
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let csrf = CsrfGuard::new(&session_secret)
            .map_err(|e| AppError::InternalError(format!("CSRF key: {}", e)))?;
        let sessions = SessionService::new(session_secret, config.auth.session_ttl_seconds);

        Ok(Self {
            postgrest,
            identity: Arc::new(identity),
            sessions: Arc::new(sessions),
            csrf: Arc::new(csrf),
            views: Arc::new(Views::new()?),
            config: Arc::new(config),
        })
    }

    /// Public pages read with the project anon key
    pub fn menu_service(&self) -> MenuServiceImpl {
        MenuService::new(
            Arc::new(PostgrestCategoryRepository::new(self.postgrest.clone())),
            Arc::new(PostgrestMenuItemRepository::new(self.postgrest.clone())),
        )
    }

    /// Dashboard reads and writes as the signed-in admin
    pub fn admin_service(&self, access_token: &str) -> AdminServiceImpl {
        let client = self.postgrest.authorized(access_token);
        AdminService::new(
            Arc::new(PostgrestCategoryRepository::new(client.clone())),
            Arc::new(PostgrestMenuItemRepository::new(client)),
            self.image_policy(),
        )
    }

    pub fn auth_service(&self) -> AuthServiceImpl {
        AuthService::new(self.identity.clone())
    }

    pub fn image_policy(&self) -> ImagePolicy {
        ImagePolicy {
            placeholder: self.config.menu.placeholder_image.clone(),
            max_bytes: self.config.menu.max_upload_bytes,
        }
    }

    pub fn default_language(&self) -> Language {
        self.config.menu.default_language.parse().unwrap_or_default()
    }

    /// `?lang=` value, else the configured default
    pub fn language(&self, raw: Option<&str>) -> Language {
        Language::from_query(raw, self.default_language())
    }
}
