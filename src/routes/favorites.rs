use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{Favorite, MediaSnapshot, Paginated},
    services::favorites,
    state::AppState,
};

use super::PageQuery;

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Favorite>>> {
    let page = favorites::list_favorites(&state.pool, user.user_id, query.page()?).await?;
    Ok(Json(page))
}

pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<MediaSnapshot>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    let favorite = favorites::add_favorite(&state.pool, user.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(favorite_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    favorites::remove_favorite(&state.pool, user.user_id, favorite_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
