//! HTTP error responses for failures that cannot become a toast

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use menu_core::error::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MenuItemNotFound(_) | DomainError::CategoryNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            e if e.is_validation() => ApiError::BadRequest(e.to_string()),
            DomainError::BackendError(msg) | DomainError::NotProvisioned(msg) => {
                ApiError::BackendUnavailable(msg)
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<handlebars::RenderError> for ApiError {
    fn from(err: handlebars::RenderError) -> Self {
        ApiError::TemplateError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "Erişim reddedildi", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "Sayfa bulunamadı", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "Geçersiz istek", msg)
            }
            ApiError::BackendUnavailable(msg) => {
                tracing::error!("Backend unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Menü şu anda yüklenemiyor",
                    "Lütfen birazdan tekrar deneyin.".to_string(),
                )
            }
            ApiError::TemplateError(msg) => {
                tracing::error!("Template error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Bir hata oluştu", String::new())
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Bir hata oluştu", String::new())
            }
        };

        let body = format!(
            "<!DOCTYPE html><html lang=\"tr\"><head><meta charset=\"utf-8\"><title>{title}</title>\
             <link rel=\"stylesheet\" href=\"/static/styles.css\"></head>\
             <body class=\"error-page\"><main><h1>{title}</h1><p>{message}</p>\
             <a href=\"/menu\">Menüye dön</a></main></body></html>",
            title = handlebars::html_escape(title),
            message = handlebars::html_escape(&message),
        );

        (status, Html(body)).into_response()
    }
}
