//! Shared HTTP client and response helpers

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::RemoteError;

pub fn create_http_client(timeout: Duration) -> Result<Client, RemoteError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("menu-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(RemoteError::Transport)
}

/// `{base}/{path}`; `path` must end with `/` for later relative joins
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url, RemoteError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|url| url.join(path))
        .map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", base_url, e)))
}

pub(crate) fn join(base: &Url, path: &str) -> Result<Url, RemoteError> {
    base.join(path)
        .map_err(|e| RemoteError::InvalidUrl(format!("{}{}: {}", base, path, e)))
}

/// Fail on non-success status, carrying the backend's error body
pub(crate) async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::from_body(status, &body))
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let body = ensure_success(response).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))
}
