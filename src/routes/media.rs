use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::OptionalAuthUser,
    models::{
        CombinedCredits, Genre, MediaItem, MediaReference, MediaType, MovieDetails, Paginated,
        PersonDetails, TvDetails,
    },
    services::media::{self, DiscoverFilter, SearchScope, TimeWindow, TrendingScope},
    state::AppState,
};

use super::{validate_page, PageQuery};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingQuery {
    #[serde(default)]
    pub media_type: TrendingScope,
    #[serde(default)]
    pub time_window: TimeWindow,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, rename = "type")]
    pub scope: SearchScope,
    pub page: Option<i64>,
}

pub async fn discover_movies(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Query(filter): Query<DiscoverFilter>,
) -> AppResult<Json<Paginated<MediaItem>>> {
    validate_page(filter.page)?;
    let page = media::discover_movies(&state.media(), user_id, &filter).await?;
    Ok(Json(page))
}

pub async fn discover_tv(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Query(filter): Query<DiscoverFilter>,
) -> AppResult<Json<Paginated<MediaItem>>> {
    validate_page(filter.page)?;
    let page = media::discover_tv(&state.media(), user_id, &filter).await?;
    Ok(Json(page))
}

pub async fn trending(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Query(query): Query<TrendingQuery>,
) -> AppResult<Json<Paginated<MediaItem>>> {
    let page = validate_page(query.page)?;
    let result = media::trending(
        &state.media(),
        user_id,
        query.media_type,
        query.time_window,
        page,
    )
    .await?;
    Ok(Json(result))
}

pub async fn search(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Paginated<MediaItem>>> {
    let page = validate_page(query.page)?;
    let text = query.query.trim();
    if text.is_empty() {
        return Err(AppError::InvalidInput("query must not be empty".to_string()));
    }

    let result = media::search(&state.media(), user_id, query.scope, text, page).await?;
    Ok(Json(result))
}

pub async fn movie_details(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieDetails>> {
    Ok(Json(media::movie_details(&state.media(), user_id, movie_id).await?))
}

pub async fn tv_details(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(tv_id): Path<i64>,
) -> AppResult<Json<TvDetails>> {
    Ok(Json(media::tv_details(&state.media(), user_id, tv_id).await?))
}

pub async fn movie_recommendations(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(movie_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<MediaItem>>> {
    let result = media::recommendations(
        &state.media(),
        user_id,
        MediaReference::movie(movie_id),
        query.page()?,
    )
    .await?;
    Ok(Json(result))
}

pub async fn tv_recommendations(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(tv_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<MediaItem>>> {
    let result = media::recommendations(
        &state.media(),
        user_id,
        MediaReference::tv(tv_id),
        query.page()?,
    )
    .await?;
    Ok(Json(result))
}

pub async fn genres(
    State(state): State<AppState>,
    Path(media_type): Path<MediaType>,
) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(media::genres(state.catalog.as_ref(), media_type).await?))
}

pub async fn person(
    State(state): State<AppState>,
    Path(person_id): Path<i64>,
) -> AppResult<Json<PersonDetails>> {
    Ok(Json(
        media::person(state.catalog.as_ref(), &state.images, person_id).await?,
    ))
}

pub async fn person_credits(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(person_id): Path<i64>,
) -> AppResult<Json<CombinedCredits>> {
    Ok(Json(
        media::person_credits(&state.media(), user_id, person_id).await?,
    ))
}
