//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendSettings,
    pub auth: AuthSettings,
    pub menu: MenuSettings,
    pub landing: LandingSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Directory served under `/static`
    pub static_dir: String,
}

/// Hosted backend (REST tables + auth endpoints share one project URL)
#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub url: String,
    pub anon_key: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// HS256 secret for session cookies. Empty means "generate one at startup".
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub cookie_name: String,
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    pub restaurant_name: String,
    pub placeholder_image: String,
    pub max_upload_bytes: usize,
    pub default_language: String,
}

/// Visible sections of the landing page
#[derive(Debug, Deserialize, Clone)]
pub struct LandingSettings {
    pub language: String,
    pub show_featured: bool,
    pub show_reservation: bool,
    pub show_admin_link: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .set_override("app.env", env.clone())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MENU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Defaults overlaid with a TOML document. Used by tests and tooling.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("app.static_dir", "static")?
            .set_default("backend.url", "http://localhost:54321")?
            .set_default("backend.anon_key", "")?
            .set_default("backend.timeout_seconds", 15)?
            .set_default("auth.session_secret", "")?
            .set_default("auth.session_ttl_seconds", crate::constants::DEFAULT_SESSION_TTL)?
            .set_default("auth.cookie_name", crate::constants::SESSION_COOKIE_NAME)?
            .set_default("auth.secure_cookies", false)?
            .set_default("menu.restaurant_name", "Prime Steakhouse")?
            .set_default("menu.placeholder_image", crate::constants::DEFAULT_PLACEHOLDER_IMAGE)?
            .set_default("menu.max_upload_bytes", crate::constants::MAX_IMAGE_UPLOAD_BYTES as i64)?
            .set_default("menu.default_language", "tr")?
            .set_default("landing.language", "tr")?
            .set_default("landing.show_featured", false)?
            .set_default("landing.show_reservation", false)?
            .set_default("landing.show_admin_link", false)?
            .set_default("telemetry.json", true)
    }
}
