use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::auth::jwt::JwtConfig;
use crate::config::Config;
use crate::db::PgFavoriteLookup;
use crate::error::AppResult;
use crate::services::{
    accounts::AccountContext, media::MediaContext, CatalogClient, FavoriteLookup, ImageUrls,
    LogMailer, Mailer, TmdbClient,
};

/// Shared application state
///
/// Holds no mutable data; every collaborator is injected so tests can swap
/// the catalog, the favorite lookup and the mailer.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub catalog: Arc<dyn CatalogClient>,
    pub favorites: Arc<dyn FavoriteLookup>,
    pub mailer: Arc<dyn Mailer>,
    pub images: Arc<ImageUrls>,
    pub jwt: Arc<JwtConfig>,
}

impl AppState {
    /// Wires the production collaborators from configuration
    pub fn from_config(config: &Config, pool: PgPool) -> AppResult<Self> {
        let catalog = TmdbClient::new(
            config.catalog_api_url.clone(),
            config.catalog_access_token.clone(),
            Duration::from_secs(config.catalog_timeout_secs),
        )?;

        Ok(Self {
            favorites: Arc::new(PgFavoriteLookup::new(pool.clone())),
            pool,
            catalog: Arc::new(catalog),
            mailer: Arc::new(LogMailer::new(config.client_url.as_str())),
            images: Arc::new(ImageUrls::from_config(config)),
            jwt: Arc::new(JwtConfig::from_config(config)),
        })
    }

    pub fn media(&self) -> MediaContext<'_> {
        MediaContext {
            catalog: self.catalog.as_ref(),
            favorites: self.favorites.as_ref(),
            images: &self.images,
        }
    }

    pub fn accounts(&self) -> AccountContext<'_> {
        AccountContext {
            pool: &self.pool,
            jwt: &self.jwt,
            mailer: self.mailer.as_ref(),
        }
    }
}
