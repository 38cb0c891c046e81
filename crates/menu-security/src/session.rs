//! Admin browser sessions stored in a signed cookie

use uuid::Uuid;

use crate::jwt::{JwtError, JwtService, SessionClaims};

/// Identity-service session as needed to build the cookie
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    /// Fresh session with a new random id
    pub fn new(user_id: Uuid, email: Option<String>, access_token: String, refresh_token: String) -> Self {
        Self {
            id: hex::encode(rand::random::<[u8; 16]>()),
            user_id,
            email,
            access_token,
            refresh_token,
        }
    }

    /// Same browser session with exchanged tokens
    pub fn with_tokens(&self, access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            ..self.clone()
        }
    }
}

impl TryFrom<SessionClaims> for Session {
    type Error = JwtError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|e| JwtError::ValidationError(e.to_string()))?;
        Ok(Self {
            id: claims.sid,
            user_id,
            email: claims.email,
            access_token: claims.access_token,
            refresh_token: claims.refresh_token,
        })
    }
}

pub struct SessionService {
    jwt: JwtService,
}

impl SessionService {
    pub fn new(secret: String, ttl_seconds: i64) -> Self {
        Self {
            jwt: JwtService::new(secret, ttl_seconds),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.jwt.expiry_seconds()
    }

    /// Cookie value for `session`
    pub fn seal(&self, session: &Session) -> Result<String, JwtError> {
        self.jwt.generate_session_token(
            &session.user_id,
            session.email.as_deref(),
            &session.id,
            &session.access_token,
            &session.refresh_token,
        )
    }

    pub fn open(&self, cookie_value: &str) -> Result<Session, JwtError> {
        self.jwt.validate_token(cookie_value)?.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_and_open() {
        let service = SessionService::new("cookie-secret".to_string(), 600);
        let session = Session::new(Uuid::new_v4(), Some("admin@lezzet.com.tr".to_string()), "a".into(), "r".into());

        let opened = service.open(&service.seal(&session).unwrap()).unwrap();
        assert_eq!(opened, session);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new(Uuid::nil(), None, "a".into(), "r".into());
        let b = Session::new(Uuid::nil(), None, "a".into(), "r".into());
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
    }

    #[test]
    fn test_refreshed_tokens_keep_session_id() {
        let session = Session::new(Uuid::new_v4(), None, "a".into(), "r".into());
        let renewed = session.with_tokens("a2".into(), "r2".into());
        assert_eq!(renewed.id, session.id);
        assert_eq!(renewed.access_token, "a2");
    }

    #[test]
    fn test_tampered_cookie_is_rejected() {
        let service = SessionService::new("cookie-secret".to_string(), 600);
        let session = Session::new(Uuid::new_v4(), None, "a".into(), "r".into());
        let mut sealed = service.seal(&session).unwrap();
        sealed.push('x');
        assert!(service.open(&sealed).is_err());
    }
}
