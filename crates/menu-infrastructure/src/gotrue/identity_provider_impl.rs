// ============================================================================
// Menu Infrastructure - GoTrue Identity Provider
// File: crates/menu-infrastructure/src/gotrue/identity_provider_impl.rs
// ============================================================================

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use menu_core::domain::{AuthSession, AuthTokens, AuthUser};
use menu_core::error::DomainError;
use menu_core::repositories::IdentityProvider;

use crate::error::RemoteError;
use crate::http::{endpoint, ensure_success, join, read_json};

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: UserResponse,
}

impl From<UserResponse> for AuthUser {
    fn from(user: UserResponse) -> Self {
        AuthUser {
            id: user.id,
            email: user.email,
        }
    }
}

impl From<TokenResponse> for AuthSession {
    fn from(token: TokenResponse) -> Self {
        AuthSession {
            user: token.user.into(),
            tokens: AuthTokens {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
            },
        }
    }
}

/// Email/password accounts on `{url}/auth/v1`
pub struct GoTrueIdentityProvider {
    http: Client,
    auth_url: Url,
    anon_key: String,
}

impl GoTrueIdentityProvider {
    pub fn new(http: Client, base_url: &str, anon_key: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            http,
            auth_url: endpoint(base_url, "auth/v1/")?,
            anon_key: anon_key.to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, bearer: Option<&str>) -> Result<RequestBuilder, RemoteError> {
        let url = join(&self.auth_url, path)?;
        debug!("{} {}", method, url);
        let bearer = bearer.unwrap_or(&self.anon_key);
        Ok(self
            .http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", bearer)))
    }

    async fn token_grant<B: Serialize>(&self, grant_type: &str, body: &B) -> Result<TokenResponse, RemoteError> {
        let path = format!("token?grant_type={}", grant_type);
        let response = self.request(Method::POST, &path, None)?.json(body).send().await?;
        read_json(response).await
    }

    async fn fetch_user(&self, access_token: &str) -> Result<UserResponse, RemoteError> {
        let response = self.request(Method::GET, "user", Some(access_token))?.send().await?;
        read_json(response).await
    }

    /// Readiness of the auth endpoints
    pub async fn health(&self) -> Result<(), RemoteError> {
        let response = self.request(Method::GET, "health", None)?.send().await?;
        ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        match self.token_grant("password", &PasswordGrant { email, password }).await {
            Ok(token) => Ok(token.into()),
            Err(RemoteError::Api { status: 400..=422, .. }) => Err(DomainError::InvalidCredentials),
            Err(e) => {
                error!("Password sign-in failed: {}", e);
                Err(e.into())
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, DomainError> {
        match self.token_grant("refresh_token", &RefreshGrant { refresh_token }).await {
            Ok(token) => Ok(token.into()),
            Err(RemoteError::Api { status: 400..=422, .. }) => Err(DomainError::SessionExpired),
            Err(e) => {
                error!("Token refresh failed: {}", e);
                Err(e.into())
            }
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, DomainError> {
        self.fetch_user(access_token).await.map(Into::into).map_err(|e| {
            if !e.is_unauthorized() {
                error!("Fetching user failed: {}", e);
            }
            e.into()
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError> {
        let response = self
            .request(Method::POST, "logout", Some(access_token))?
            .send()
            .await
            .map_err(RemoteError::from)?;
        ensure_success(response).await?;
        Ok(())
    }
}
