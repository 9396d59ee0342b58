use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Favorite, MediaReference, MediaSnapshot, MediaType};
use crate::services::favorites_map::FavoriteLookup;

use super::listing::{self, ListPage, ListScope};

const COLUMNS: &str = "id, user_id, media_id, media_type, media_title, media_poster, \
    media_release_date, created_at";

/// Provides CRUD operations for favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite, or return the existing one for the same `(user, media_id)`.
    ///
    /// The conflict target deliberately ignores `media_type`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        media: &MediaSnapshot,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (id, user_id, media_id, media_type, media_title, media_poster, media_release_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (user_id, media_id) DO UPDATE SET media_id = favorites.media_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(media.media_id)
            .bind(media.media_type)
            .bind(&media.media_title)
            .bind(&media.media_poster)
            .bind(&media.media_release_date)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<ListPage<Favorite>, sqlx::Error> {
        let source = format!("SELECT {COLUMNS} FROM favorites r");
        listing::fetch_page(pool, &source, ListScope::Owner(user_id), page, page_size).await
    }

    /// Delete a favorite owned by `user_id`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_user(conn: &mut PgConnection, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct FavoritedRow {
    media_id: i64,
    media_type: MediaType,
}

/// Favorite lookup backed by the `favorites` table
#[derive(Clone)]
pub struct PgFavoriteLookup {
    pool: PgPool,
}

impl PgFavoriteLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FavoriteLookup for PgFavoriteLookup {
    async fn find_favorited(
        &self,
        user_id: Uuid,
        medias: &[MediaReference],
    ) -> Result<Vec<MediaReference>, sqlx::Error> {
        let ids: Vec<i64> = medias.iter().map(|m| m.id).collect();
        let types: Vec<String> = medias
            .iter()
            .map(|m| m.media_type.as_str().to_string())
            .collect();

        let rows: Vec<FavoritedRow> = sqlx::query_as(
            "SELECT media_id, media_type FROM favorites \
             WHERE user_id = $1 \
               AND (media_id, media_type::text) IN (SELECT * FROM UNNEST($2::bigint[], $3::text[]))",
        )
        .bind(user_id)
        .bind(&ids)
        .bind(&types)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MediaReference::new(row.media_id, row.media_type))
            .collect())
    }
}
