//! CSRF protection for admin forms.
//!
//! Tokens are an HMAC of the session id, so nothing extra has to be stored:
//! any form rendered for a session carries the same token until sign-out.

use hmac::{digest::InvalidLength, Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct CsrfGuard {
    keyed: HmacSha256,
}

impl CsrfGuard {
    pub fn new(secret: &str) -> Result<Self, InvalidLength> {
        let keyed = HmacSha256::new_from_slice(format!("csrf:{}", secret).as_bytes())?;
        Ok(Self { keyed })
    }

    fn mac(&self, session_id: &str) -> HmacSha256 {
        let mut mac = self.keyed.clone();
        mac.update(session_id.as_bytes());
        mac
    }

    pub fn token(&self, session_id: &str) -> String {
        hex::encode(self.mac(session_id).finalize().into_bytes())
    }

    /// Constant-time comparison against the expected token
    pub fn verify(&self, session_id: &str, token: &str) -> bool {
        match hex::decode(token.trim()) {
            Ok(bytes) => self.mac(session_id).verify_slice(&bytes).is_ok(),
            Err(_) => false,
        }
    }
}
