pub mod accounts;
pub mod catalog;
pub mod favorites;
pub mod favorites_map;
pub mod mailer;
pub mod media;
pub mod media_mapper;
pub mod posts;

pub use catalog::{CatalogClient, TmdbClient};
pub use favorites_map::{media_favorites_map, FavoriteLookup, FavoritesMap};
pub use mailer::{LogMailer, Mailer};
pub use media_mapper::ImageUrls;
