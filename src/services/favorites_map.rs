use std::collections::HashMap;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{FavoriteStatus, MediaReference, MediaType};

/// Batched favorite lookup against storage
///
/// One call is one query: implementations must match every requested
/// `(media_id, media_type)` pair for the user in a single round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FavoriteLookup: Send + Sync {
    async fn find_favorited(
        &self,
        user_id: Uuid,
        medias: &[MediaReference],
    ) -> Result<Vec<MediaReference>, sqlx::Error>;
}

/// Media types a user has favorited, keyed by catalog id.
///
/// Ids can collide across movies and TV, so values are lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesMap {
    entries: HashMap<i64, Vec<MediaType>>,
}

impl FavoritesMap {
    pub fn insert(&mut self, reference: MediaReference) {
        let types = self.entries.entry(reference.id).or_default();
        if !types.contains(&reference.media_type) {
            types.push(reference.media_type);
        }
    }

    pub fn contains(&self, reference: &MediaReference) -> bool {
        self.entries
            .get(&reference.id)
            .is_some_and(|types| types.contains(&reference.media_type))
    }

    pub fn get(&self, media_id: i64) -> Option<&[MediaType]> {
        self.entries.get(&media_id).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Favorite status of `reference` for the (optional) requesting user
    pub fn status_for(&self, reference: &MediaReference, user_id: Option<Uuid>) -> FavoriteStatus {
        match user_id {
            None => FavoriteStatus::Unknown,
            Some(_) if self.contains(reference) => FavoriteStatus::Favorited,
            Some(_) => FavoriteStatus::NotFavorited,
        }
    }
}

impl FromIterator<MediaReference> for FavoritesMap {
    fn from_iter<I: IntoIterator<Item = MediaReference>>(iter: I) -> Self {
        let mut map = FavoritesMap::default();
        for reference in iter {
            map.insert(reference);
        }
        map
    }
}

/// Looks up which of `medias` the user has favorited.
///
/// Anonymous requests and empty pages return an empty map without touching
/// storage.
pub async fn media_favorites_map(
    lookup: &dyn FavoriteLookup,
    medias: &[MediaReference],
    user_id: Option<Uuid>,
) -> AppResult<FavoritesMap> {
    let Some(user_id) = user_id else {
        return Ok(FavoritesMap::default());
    };

    if medias.is_empty() {
        return Ok(FavoritesMap::default());
    }

    let favorited = lookup.find_favorited(user_id, medias).await?;

    tracing::debug!(
        user_id = %user_id,
        requested = medias.len(),
        favorited = favorited.len(),
        "Resolved favorites for media page"
    );

    Ok(favorited.into_iter().collect())
}
