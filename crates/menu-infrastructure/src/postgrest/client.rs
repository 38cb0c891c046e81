// ============================================================================
// Menu Infrastructure - PostgREST Client
// File: crates/menu-infrastructure/src/postgrest/client.rs
// ============================================================================

use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::query::TableQuery;
use crate::error::RemoteError;
use crate::http::{endpoint, ensure_success, join, read_json};

/// Table-level CRUD against `{url}/rest/v1`.
///
/// Requests go out with the project anon key; `authorized` returns a copy that
/// sends a signed-in user's access token instead so row-level policies apply.
#[derive(Clone)]
pub struct PostgrestClient {
    http: Client,
    rest_url: Url,
    anon_key: String,
    access_token: Option<String>,
}

impl PostgrestClient {
    pub fn new(http: Client, base_url: &str, anon_key: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            http,
            rest_url: endpoint(base_url, "rest/v1/")?,
            anon_key: anon_key.to_string(),
            access_token: None,
        })
    }

    pub fn authorized(&self, access_token: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            ..self.clone()
        }
    }

    fn url_for(&self, query: &TableQuery) -> Result<Url, RemoteError> {
        let mut url = join(&self.rest_url, query.table())?;
        query.apply(&mut url);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", bearer))
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &TableQuery) -> Result<Vec<T>, RemoteError> {
        let url = self.url_for(query)?;
        debug!("GET {}", url);
        let response = self.request(Method::GET, url).send().await?;
        read_json(response).await
    }

    /// Insert one row and return what the backend stored
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<Vec<T>, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(&TableQuery::from(table))?;
        debug!("POST {}", url);
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    /// Patch every row matched by `query`; returns the updated rows
    pub async fn update<B, T>(&self, query: &TableQuery, body: &B) -> Result<Vec<T>, RemoteError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(query)?;
        debug!("PATCH {}", url);
        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn delete(&self, query: &TableQuery) -> Result<(), RemoteError> {
        let url = self.url_for(query)?;
        debug!("DELETE {}", url);
        let response = self.request(Method::DELETE, url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Cheapest possible read on `table`, for readiness checks
    pub async fn ping(&self, table: &str) -> Result<(), RemoteError> {
        let query = TableQuery::from(table).select("id").limit(1);
        self.select::<serde_json::Value>(&query).await.map(|_| ())
    }
}
