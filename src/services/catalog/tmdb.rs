/// TMDB catalog client
///
/// Every request carries the same bearer credential (a TMDB v4 read access
/// token); there is no per-user authentication upstream.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};

use super::{CatalogClient, CatalogParams};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_url: String,
    access_token: String,
}

impl TmdbClient {
    pub fn new(api_url: String, access_token: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    async fn get(&self, path: &str, params: CatalogParams) -> AppResult<serde_json::Value> {
        let url = self.url_for(path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(rejected(path, status, response.text().await));
        }

        let body: serde_json::Value = response.json().await?;

        tracing::debug!(path = %path, provider = "tmdb", "Catalog request completed");

        Ok(body)
    }
}

/// Builds the error for a non-2xx response. A body that cannot be read is
/// logged and leaves the message empty.
fn rejected<E: std::fmt::Display>(path: &str, status: u16, body: Result<String, E>) -> AppError {
    let message = body.unwrap_or_else(|e| {
        tracing::warn!(
            path = %path,
            status,
            error = %e,
            provider = "tmdb",
            "Failed to read catalog error body"
        );
        String::new()
    });

    tracing::warn!(
        path = %path,
        status,
        provider = "tmdb",
        "Catalog request rejected"
    );
    AppError::ExternalApi { status, message }
}
