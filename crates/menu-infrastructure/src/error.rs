//! Remote backend errors and their mapping onto domain errors

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use menu_core::error::DomainError;
use menu_shared::constants::MISSING_RELATION_CODES;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// Error body shapes of both the REST and the auth endpoints
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<serde_json::Value>,
    error_code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RemoteError {
    /// Build an `Api` error from a non-success response body
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let code = parsed.error_code.or_else(|| match parsed.code {
            Some(serde_json::Value::String(code)) => Some(code),
            _ => None,
        });
        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body.trim().to_string()
                }
            });

        RemoteError::Api {
            status: status.as_u16(),
            code,
            message,
            details: parsed.details,
            hint: parsed.hint,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            RemoteError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The table (or schema cache entry) does not exist yet
    pub fn is_missing_relation(&self) -> bool {
        match self {
            RemoteError::Api { code, message, .. } => {
                code.as_deref().is_some_and(|c| MISSING_RELATION_CODES.contains(&c))
                    || message.contains("does not exist")
            }
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<RemoteError> for DomainError {
    fn from(err: RemoteError) -> Self {
        if err.is_missing_relation() {
            return DomainError::NotProvisioned(err.to_string());
        }
        if err.is_unauthorized() {
            return DomainError::SessionExpired;
        }
        DomainError::BackendError(err.to_string())
    }
}
