use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{AuthoredPost, MediaPost, MediaReference, NewPost};

use super::listing::{self, ListPage, ListScope};

const COLUMNS: &str = "id, user_id, media_id, media_type, media_title, media_poster, \
    media_release_date, content, created_at, updated_at";

/// Author fields exposed on listings. Credential columns are never selected.
const AUTHOR_PROFILE: &str = "json_build_object(\
    'id', u.id, 'name', u.name, 'email', u.email, 'avatar', u.avatar, \
    'is_verified', u.verify_token IS NULL)";

/// Tables holding media posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTable {
    Comments,
    Reviews,
}

impl PostTable {
    pub fn table(&self) -> &'static str {
        match self {
            PostTable::Comments => "comments",
            PostTable::Reviews => "reviews",
        }
    }

    /// Entity name used in error messages
    pub fn entity(&self) -> &'static str {
        match self {
            PostTable::Comments => "Comment",
            PostTable::Reviews => "Review",
        }
    }
}

/// Provides CRUD operations for comments and reviews.
pub struct PostRepo;

impl PostRepo {
    pub async fn create(
        pool: &PgPool,
        table: PostTable,
        user_id: Uuid,
        input: &NewPost,
    ) -> Result<MediaPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (id, user_id, media_id, media_type, media_title, media_poster, media_release_date, content)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}",
            table.table()
        );
        sqlx::query_as::<_, MediaPost>(&query)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(input.media.media_id)
            .bind(input.media.media_type)
            .bind(&input.media.media_title)
            .bind(&input.media.media_poster)
            .bind(&input.media.media_release_date)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        table: PostTable,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<ListPage<MediaPost>, sqlx::Error> {
        let source = format!("SELECT {COLUMNS} FROM {} r", table.table());
        listing::fetch_page(pool, &source, ListScope::Owner(user_id), page, page_size).await
    }

    /// Posts on a catalog item, each with its author's public profile
    pub async fn list_by_media(
        pool: &PgPool,
        table: PostTable,
        media: MediaReference,
        page: i64,
        page_size: i64,
    ) -> Result<ListPage<AuthoredPost>, sqlx::Error> {
        let source = format!(
            "SELECT r.*, {AUTHOR_PROFILE} AS author FROM {} r JOIN users u ON u.id = r.user_id",
            table.table()
        );
        listing::fetch_page(pool, &source, ListScope::Media(media), page, page_size).await
    }

    /// Delete a post owned by `user_id`. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        table: PostTable,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", table.table());
        let result = sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_user(
        conn: &mut PgConnection,
        table: PostTable,
        user_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE user_id = $1", table.table());
        let result = sqlx::query(&query).bind(user_id).execute(conn).await?;
        Ok(result.rows_affected())
    }
}
