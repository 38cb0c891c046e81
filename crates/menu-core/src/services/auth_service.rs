// ============================================================================
// Menu Core - Authentication Service
// File: crates/menu-core/src/services/auth_service.rs
// ============================================================================
//! Admin sign-in, session verification and sign-out against the identity service

use std::sync::Arc;
use tracing::{info, warn};

use menu_shared::utils::mask_email;

use crate::domain::{AuthSession, AuthTokens, AuthUser};
use crate::error::DomainError;
use crate::repositories::IdentityProvider;

/// Result of checking a stored session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCheck {
    /// Access token still accepted
    Active(AuthUser),
    /// Access token had expired and was exchanged; the caller must persist the new tokens
    Refreshed(AuthSession),
}

/// Authentication service for the admin dashboard
pub struct AuthService<P: IdentityProvider> {
    provider: Arc<P>,
}

impl<P: IdentityProvider> AuthService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::MissingCredentials);
        }

        info!("Login attempt for email: {}", mask_email(email));

        match self.provider.sign_in_with_password(email, password).await {
            Ok(session) => {
                info!("Login successful for: {}", mask_email(email));
                Ok(session)
            }
            Err(e) => {
                warn!("Login failed for {}: {}", mask_email(email), e);
                Err(e)
            }
        }
    }

    /// Confirm the stored tokens with the identity service, refreshing once if expired
    pub async fn verify(&self, tokens: &AuthTokens) -> Result<SessionCheck, DomainError> {
        match self.provider.get_user(&tokens.access_token).await {
            Ok(user) => Ok(SessionCheck::Active(user)),
            Err(DomainError::SessionExpired) => {
                let session = self.provider.refresh(&tokens.refresh_token).await.map_err(|e| {
                    warn!("Session refresh failed: {}", e);
                    DomainError::SessionExpired
                })?;
                info!("Session refreshed for user {}", session.user.id);
                Ok(SessionCheck::Refreshed(session))
            }
            Err(e) => Err(e),
        }
    }

    /// Sign out. Failures are logged; the local session is discarded regardless.
    pub async fn logout(&self, access_token: &str) {
        if let Err(e) = self.provider.sign_out(access_token).await {
            warn!("Identity service sign-out failed: {}", e);
        }
    }
}
