use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};
use tracing::{debug, warn};

use menu_core::domain::{AuthTokens, AuthUser};
use menu_core::error::DomainError;
use menu_core::services::SessionCheck;
use menu_security::{CsrfGuard, Session};
use menu_shared::config::AuthSettings;

use crate::error::ApiError;
use crate::state::AppState;

/// Signed-in admin, attached to every request under `/admin`
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session: Session,
    pub user: AuthUser,
    pub csrf_token: String,
}

impl AdminSession {
    /// Reject a mutation whose form token does not belong to this session
    pub fn verify_csrf(&self, guard: &CsrfGuard, token: &str) -> Result<(), ApiError> {
        if guard.verify(&self.session.id, token) {
            Ok(())
        } else {
            warn!("CSRF token mismatch for user {}", self.user.id);
            Err(ApiError::Forbidden("invalid CSRF token".to_string()))
        }
    }
}

pub fn set_session_cookie(
    cookies: &Cookies,
    state: &AppState,
    session: &Session,
) -> Result<(), ApiError> {
    let value = state
        .sessions
        .seal(session)
        .map_err(|e| ApiError::InternalError(format!("Failed to seal session: {}", e)))?;
    let auth = &state.config.auth;

    cookies.add(
        Cookie::build((auth.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(auth.secure_cookies)
            .max_age(Duration::seconds(state.sessions.ttl_seconds()))
            .build(),
    );
    Ok(())
}

pub fn clear_session_cookie(cookies: &Cookies, auth: &AuthSettings) {
    cookies.remove(Cookie::build((auth.cookie_name.clone(), "")).path("/").build());
}

/// Resolve the session cookie into a verified admin.
///
/// The cookie signature and expiry are checked locally, then the access token
/// with the identity service. An expired access token is exchanged once and the
/// cookie re-issued. `SessionExpired` means the visitor has to sign in again.
pub async fn authenticate(state: &AppState, cookies: &Cookies) -> Result<AdminSession, DomainError> {
    let value = cookies
        .get(&state.config.auth.cookie_name)
        .map(|c| c.value().to_string())
        .ok_or(DomainError::SessionExpired)?;

    let session = state.sessions.open(&value).map_err(|e| {
        debug!("Session cookie rejected: {}", e);
        DomainError::SessionExpired
    })?;

    let tokens = AuthTokens {
        access_token: session.access_token.clone(),
        refresh_token: session.refresh_token.clone(),
    };

    let (session, user) = match state.auth_service().verify(&tokens).await? {
        SessionCheck::Active(user) => (session, user),
        SessionCheck::Refreshed(fresh) => {
            let session = session.with_tokens(fresh.tokens.access_token, fresh.tokens.refresh_token);
            set_session_cookie(cookies, state, &session).map_err(|e| DomainError::InternalError(e.to_string()))?;
            (session, fresh.user)
        }
    };

    Ok(AdminSession {
        csrf_token: state.csrf.token(&session.id),
        session,
        user,
    })
}

/// Gate for the dashboard: anonymous or expired visitors go to the login page
pub async fn require_admin(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &cookies).await {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(DomainError::SessionExpired) | Err(DomainError::InvalidCredentials) => {
            clear_session_cookie(&cookies, &state.config.auth);
            Redirect::to("/auth/login").into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
