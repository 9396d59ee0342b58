/// Comments and reviews
///
/// Both kinds share one code path; `PostTable` selects the table.
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{PostRepo, PostTable},
    error::{AppError, AppResult},
    models::{AuthoredPost, MediaPost, MediaReference, NewPost, Paginated, PaginationEnvelope},
};

pub const COMMENTS_PAGE_SIZE: i64 = 10;
pub const REVIEWS_PAGE_SIZE: i64 = 10;

pub fn page_size(table: PostTable) -> i64 {
    match table {
        PostTable::Comments => COMMENTS_PAGE_SIZE,
        PostTable::Reviews => REVIEWS_PAGE_SIZE,
    }
}

fn validate_post(table: PostTable, input: &NewPost) -> AppResult<()> {
    if input.content.trim().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{} content must not be empty",
            table.entity()
        )));
    }
    if input.media.media_id <= 0 {
        return Err(AppError::InvalidInput("mediaId must be positive".to_string()));
    }
    if input.media.media_title.trim().is_empty() {
        return Err(AppError::InvalidInput("mediaTitle is required".to_string()));
    }
    Ok(())
}

pub async fn create_post(
    pool: &PgPool,
    table: PostTable,
    user_id: Uuid,
    input: NewPost,
) -> AppResult<MediaPost> {
    validate_post(table, &input)?;

    let post = PostRepo::create(pool, table, user_id, &input).await?;
    tracing::info!(
        user_id = %user_id,
        post_id = %post.id,
        table = table.table(),
        "Post created"
    );
    Ok(post)
}

pub async fn list_my_posts(
    pool: &PgPool,
    table: PostTable,
    user_id: Uuid,
    page: i64,
) -> AppResult<Paginated<MediaPost>> {
    let size = page_size(table);
    let list = PostRepo::list_by_user(pool, table, user_id, page, size).await?;
    Ok(Paginated::new(
        list.items,
        PaginationEnvelope::local(page, list.count, size),
    ))
}

/// Posts on a catalog item, each carrying its author's public profile
pub async fn list_media_posts(
    pool: &PgPool,
    table: PostTable,
    media: MediaReference,
    page: i64,
) -> AppResult<Paginated<AuthoredPost>> {
    let size = page_size(table);
    let list = PostRepo::list_by_media(pool, table, media, page, size).await?;
    Ok(Paginated::new(
        list.items,
        PaginationEnvelope::local(page, list.count, size),
    ))
}

/// Deletes a post owned by `user_id`; other users' posts are reported as missing.
pub async fn delete_post(
    pool: &PgPool,
    table: PostTable,
    user_id: Uuid,
    post_id: Uuid,
) -> AppResult<()> {
    if !PostRepo::delete(pool, table, post_id, user_id).await? {
        return Err(AppError::not_found(table.entity()));
    }
    Ok(())
}
