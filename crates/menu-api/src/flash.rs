//! Toast notifications carried across a redirect in a short-lived cookie

use axum::response::{IntoResponse, Redirect, Response};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};

use menu_core::error::DomainError;
use menu_shared::constants::TOAST_COOKIE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(description: &str) -> Self {
        Self {
            title: "Başarılı".to_string(),
            description: description.to_string(),
            variant: ToastVariant::Default,
        }
    }

    pub fn notice(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: ToastVariant::Destructive,
        }
    }

    /// User-facing copy for a failed operation; `fallback` describes what failed
    pub fn for_error(err: &DomainError, fallback: &str) -> Self {
        match err {
            DomainError::MissingItemFields => {
                Self::error("Hata", "Lütfen tüm gerekli alanları doldurun (Türkçe alanlar zorunludur)")
            }
            DomainError::CategoryNameRequired => Self::error("Hata", "Türkçe kategori adı gereklidir"),
            DomainError::CategoryNameAlreadyExists(_) => Self::error("Hata", "Bu isimde bir kategori zaten mevcut"),
            DomainError::CategoryNotEmpty { item_count } => Self::error(
                "Kategori silinemiyor",
                &format!(
                    "Bu kategoride {} öğe bulunuyor. Önce tüm öğeleri taşıyın veya silin.",
                    item_count
                ),
            ),
            DomainError::UnknownCategory(_) => Self::error("Hata", "Seçilen kategori bulunamadı"),
            DomainError::InvalidImageType(_) => Self::error(
                "Geçersiz dosya türü",
                "Lütfen bir resim dosyası seçin (JPG, PNG, GIF, vb.)",
            ),
            DomainError::ImageTooLarge { limit, .. } => Self::error(
                "Dosya çok büyük",
                &format!("Lütfen {}'dan küçük bir resim seçin", size_label(*limit)),
            ),
            DomainError::MissingCredentials => Self::error("Hata", "Lütfen e-posta ve şifrenizi girin"),
            DomainError::InvalidCredentials => Self::error("Giriş başarısız", "Geçersiz e-posta veya şifre"),
            DomainError::SessionExpired => Self::error("Oturum sona erdi", "Lütfen tekrar giriş yapın"),
            _ => Self::error("Hata", fallback),
        }
    }

    fn encode(&self) -> Option<String> {
        serde_json::to_vec(self).ok().map(|json| URL_SAFE_NO_PAD.encode(json))
    }

    fn decode(value: &str) -> Option<Self> {
        let json = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

/// Upload ceiling in whole MB, or KB below 1 MB, rounded up
fn size_label(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes < MB {
        format!("{}KB", bytes.div_ceil(1024))
    } else {
        format!("{}MB", bytes.div_ceil(MB))
    }
}

fn toast_cookie(value: String) -> Cookie<'static> {
    Cookie::build((TOAST_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .build()
}

pub fn push_toast(cookies: &Cookies, toast: &Toast) {
    if let Some(value) = toast.encode() {
        cookies.add(toast_cookie(value));
    }
}

/// Read and clear the pending toast
pub fn take_toast(cookies: &Cookies) -> Option<Toast> {
    let value = cookies.get(TOAST_COOKIE_NAME)?.value().to_string();
    cookies.remove(toast_cookie(String::new()));
    Toast::decode(&value)
}

/// Post/redirect/get: queue `toast` and send the browser to `location`
pub fn redirect_with(cookies: &Cookies, location: &str, toast: Toast) -> Response {
    push_toast(cookies, &toast);
    Redirect::to(location).into_response()
}
