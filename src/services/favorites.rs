use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::FavoriteRepo,
    error::{AppError, AppResult},
    models::{Favorite, MediaSnapshot, Paginated, PaginationEnvelope},
};

pub const FAVORITES_PAGE_SIZE: i64 = 20;

fn validate_snapshot(media: &MediaSnapshot) -> AppResult<()> {
    if media.media_id <= 0 {
        return Err(AppError::InvalidInput("mediaId must be positive".to_string()));
    }
    if media.media_title.trim().is_empty() {
        return Err(AppError::InvalidInput("mediaTitle is required".to_string()));
    }
    Ok(())
}

/// Saves a favorite. Adding the same catalog id twice returns the existing record.
pub async fn add_favorite(pool: &PgPool, user_id: Uuid, media: MediaSnapshot) -> AppResult<Favorite> {
    validate_snapshot(&media)?;

    let favorite = FavoriteRepo::upsert(pool, user_id, &media).await?;
    tracing::info!(
        user_id = %user_id,
        media_id = favorite.media_id,
        media_type = %favorite.media_type,
        "Favorite saved"
    );
    Ok(favorite)
}

pub async fn list_favorites(
    pool: &PgPool,
    user_id: Uuid,
    page: i64,
) -> AppResult<Paginated<Favorite>> {
    let list = FavoriteRepo::list_by_user(pool, user_id, page, FAVORITES_PAGE_SIZE).await?;
    Ok(Paginated::new(
        list.items,
        PaginationEnvelope::local(page, list.count, FAVORITES_PAGE_SIZE),
    ))
}

pub async fn remove_favorite(pool: &PgPool, user_id: Uuid, favorite_id: Uuid) -> AppResult<()> {
    if !FavoriteRepo::delete(pool, favorite_id, user_id).await? {
        return Err(AppError::not_found("Favorite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    fn snapshot(media_id: i64, title: &str) -> MediaSnapshot {
        MediaSnapshot {
            media_id,
            media_type: MediaType::Movie,
            media_title: title.to_string(),
            media_poster: None,
            media_release_date: None,
        }
    }

    #[test]
    fn test_snapshot_validation() {
        assert!(validate_snapshot(&snapshot(550, "Fight Club")).is_ok());
        assert!(validate_snapshot(&snapshot(0, "Fight Club")).is_err());
        assert!(validate_snapshot(&snapshot(550, "  ")).is_err());
    }
}
