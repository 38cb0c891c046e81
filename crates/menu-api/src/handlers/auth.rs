use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::{info, warn};

use menu_core::domain::Language;
use menu_security::Session;

use crate::error::ApiError;
use crate::flash::{redirect_with, take_toast, Toast};
use crate::middleware::{authenticate, clear_session_cookie, set_session_cookie};
use crate::state::AppState;
use crate::views::{admin::LoginPage, Chrome};

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutForm {
    #[serde(default)]
    pub csrf_token: String,
}

fn login_page(state: &AppState, email: &str, toast: Option<Toast>) -> Result<Response, ApiError> {
    let page = LoginPage {
        chrome: Chrome::new("Yönetici Girişi", &state.config.menu.restaurant_name, Language::Tr, toast),
        email: email.to_string(),
    };
    Ok(state.views.render("login", &page)?.into_response())
}

pub async fn login_form(State(state): State<AppState>, cookies: Cookies) -> Result<Response, ApiError> {
    if authenticate(&state, &cookies).await.is_ok() {
        return Ok(Redirect::to("/admin").into_response());
    }
    login_page(&state, "", take_toast(&cookies))
}

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match state.auth_service().login(&form.email, &form.password).await {
        Ok(auth) => {
            let session = Session::new(
                auth.user.id,
                auth.user.email.clone(),
                auth.tokens.access_token,
                auth.tokens.refresh_token,
            );
            set_session_cookie(&cookies, &state, &session)?;
            Ok(redirect_with(
                &cookies,
                "/admin",
                Toast::notice("Giriş başarılı", "Yönetici paneline hoş geldiniz"),
            ))
        }
        Err(e) => {
            login_page(&state, form.email.trim(), Some(Toast::for_error(&e, "Giriş yapılamadı")))
        }
    }
}

/// Sign out upstream, drop the cookie and return to the public menu
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LogoutForm>,
) -> Result<Response, ApiError> {
    let session = cookies
        .get(&state.config.auth.cookie_name)
        .and_then(|c| state.sessions.open(c.value()).ok());

    if let Some(session) = session {
        if !state.csrf.verify(&session.id, &form.csrf_token) {
            warn!("CSRF token mismatch on logout for user {}", session.user_id);
            return Err(ApiError::Forbidden("invalid CSRF token".to_string()));
        }
        state.auth_service().logout(&session.access_token).await;
        info!("Admin signed out: {}", session.user_id);
    }

    clear_session_cookie(&cookies, &state.config.auth);
    Ok(redirect_with(
        &cookies,
        "/menu",
        Toast::notice("Çıkış yapıldı", "Başarıyla çıkış yaptınız"),
    ))
}
