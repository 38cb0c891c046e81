//! Identity provider trait (port)

use async_trait::async_trait;
use crate::domain::{AuthSession, AuthUser};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, DomainError>;
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, DomainError>;
    /// `DomainError::SessionExpired` when the token is no longer accepted
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, DomainError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError>;
}
