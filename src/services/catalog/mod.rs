/// Upstream catalog abstraction
///
/// Everything the service knows about movies and TV shows comes from a single
/// third-party catalog. Services receive it as an injected `CatalogClient` so
/// tests can substitute a double and nothing holds a process-wide client.
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Query string pairs for a catalog request
pub type CatalogParams = Vec<(String, String)>;

/// Trait for upstream catalog clients
///
/// Implementations issue one GET per call and return the decoded JSON body.
/// Non-2xx responses and transport failures are returned as errors; nothing is
/// retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn get(&self, path: &str, params: CatalogParams) -> AppResult<serde_json::Value>;
}

/// Fetch a catalog resource and decode it into `T`
pub async fn fetch<T: DeserializeOwned>(
    client: &dyn CatalogClient,
    path: &str,
    params: CatalogParams,
) -> AppResult<T> {
    let body = client.get(path, params).await?;

    serde_json::from_value(body).map_err(|e| {
        tracing::error!(error = %e, path = %path, "Failed to decode catalog response");
        AppError::ExternalApi {
            status: 200,
            message: format!("Unexpected catalog response for {}: {}", path, e),
        }
    })
}

/// Builder for catalog query strings that skips unset values
#[derive(Debug, Default, Clone)]
pub struct ParamsBuilder {
    params: CatalogParams,
}

impl ParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn set_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn build(self) -> CatalogParams {
        self.params
    }
}
