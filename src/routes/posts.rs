use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    db::PostTable,
    error::AppResult,
    middleware::AuthUser,
    models::{AuthoredPost, MediaPost, MediaReference, MediaType, NewPost, Paginated},
    services::posts,
    state::AppState,
};

use super::PageQuery;

pub async fn create(
    State(state): State<AppState>,
    Extension(table): Extension<PostTable>,
    user: AuthUser,
    Json(body): Json<NewPost>,
) -> AppResult<(StatusCode, Json<MediaPost>)> {
    let post = posts::create_post(&state.pool, table, user.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_mine(
    State(state): State<AppState>,
    Extension(table): Extension<PostTable>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<MediaPost>>> {
    let page = posts::list_my_posts(&state.pool, table, user.user_id, query.page()?).await?;
    Ok(Json(page))
}

pub async fn list_for_media(
    State(state): State<AppState>,
    Extension(table): Extension<PostTable>,
    Path((media_type, media_id)): Path<(MediaType, i64)>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<AuthoredPost>>> {
    let media = MediaReference::new(media_id, media_type);
    let page = posts::list_media_posts(&state.pool, table, media, query.page()?).await?;
    Ok(Json(page))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(table): Extension<PostTable>,
    user: AuthUser,
    Path(post_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    posts::delete_post(&state.pool, table, user.user_id, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
