/// Catalog browsing with per-user favorite annotation
///
/// Every function follows the same pipeline: fetch from the catalog, collect
/// the references on the page, resolve favorites with one batched lookup,
/// map to DTOs and wrap the page metadata.
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        CatalogCombinedCredits, CatalogGenres, CatalogMedia, CatalogMovie, CatalogMovieDetails,
        CatalogPage, CatalogPerson, CatalogTv, CatalogTvDetails, CombinedCredits, Genre,
        MediaItem, MediaReference, MediaType, MovieDetails, Paginated, PaginationEnvelope,
        PersonDetails, TvDetails,
    },
    services::{
        catalog::{self, CatalogClient, ParamsBuilder},
        favorites_map::{media_favorites_map, FavoriteLookup},
        media_mapper::{self, ImageUrls, MapContext, UpstreamMedia},
    },
};

/// Collaborators shared by the browsing functions
#[derive(Clone, Copy)]
pub struct MediaContext<'a> {
    pub catalog: &'a dyn CatalogClient,
    pub favorites: &'a dyn FavoriteLookup,
    pub images: &'a ImageUrls,
}

/// Filters accepted by the discover endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverFilter {
    pub page: Option<i64>,
    pub sort_by: Option<String>,
    pub vote_average_gte: Option<f64>,
    pub vote_average_lte: Option<f64>,
    pub with_genres: Option<String>,
}

impl DiscoverFilter {
    fn params(&self, media_type: MediaType) -> catalog::CatalogParams {
        let builder = ParamsBuilder::new()
            .set("page", self.page.unwrap_or(1))
            .set("include_adult", false)
            .set_opt("sort_by", self.sort_by.as_deref())
            .set_opt("vote_average.gte", self.vote_average_gte)
            .set_opt("vote_average.lte", self.vote_average_lte)
            .set_opt("with_genres", self.with_genres.as_deref());

        match media_type {
            MediaType::Movie => builder.set("include_video", false).build(),
            MediaType::Tv => builder.build(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingScope {
    #[default]
    All,
    Movie,
    Tv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    Multi,
    Movie,
    Tv,
}

/// Fetch one upstream page and annotate it
async fn annotated_page<T>(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    path: &str,
    params: catalog::CatalogParams,
) -> AppResult<Paginated<MediaItem>>
where
    T: UpstreamMedia + serde::de::DeserializeOwned,
{
    let page: CatalogPage<T> = catalog::fetch(ctx.catalog, path, params).await?;
    let pagination = PaginationEnvelope::from_upstream(&page);

    let references: Vec<MediaReference> =
        page.results.iter().filter_map(T::reference).collect();
    let favorites = media_favorites_map(ctx.favorites, &references, user_id).await?;

    let map_ctx = MapContext {
        favorites: &favorites,
        user_id,
        images: ctx.images,
    };
    let data = media_mapper::map_items(page.results, &map_ctx);

    tracing::debug!(
        path = %path,
        items = data.len(),
        page = pagination.current_page,
        "Catalog page mapped"
    );

    Ok(Paginated::new(data, pagination))
}

pub async fn discover_movies(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    filter: &DiscoverFilter,
) -> AppResult<Paginated<MediaItem>> {
    annotated_page::<CatalogMovie>(
        ctx,
        user_id,
        "/discover/movie",
        filter.params(MediaType::Movie),
    )
    .await
}

pub async fn discover_tv(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    filter: &DiscoverFilter,
) -> AppResult<Paginated<MediaItem>> {
    annotated_page::<CatalogTv>(ctx, user_id, "/discover/tv", filter.params(MediaType::Tv)).await
}

pub async fn trending(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    scope: TrendingScope,
    window: TimeWindow,
    page: i64,
) -> AppResult<Paginated<MediaItem>> {
    let window = match window {
        TimeWindow::Day => "day",
        TimeWindow::Week => "week",
    };
    let params = ParamsBuilder::new().set("page", page).build();

    match scope {
        TrendingScope::All => {
            let path = format!("/trending/all/{}", window);
            annotated_page::<CatalogMedia>(ctx, user_id, &path, params).await
        }
        TrendingScope::Movie => {
            let path = format!("/trending/movie/{}", window);
            annotated_page::<CatalogMovie>(ctx, user_id, &path, params).await
        }
        TrendingScope::Tv => {
            let path = format!("/trending/tv/{}", window);
            annotated_page::<CatalogTv>(ctx, user_id, &path, params).await
        }
    }
}

pub async fn search(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    scope: SearchScope,
    query: &str,
    page: i64,
) -> AppResult<Paginated<MediaItem>> {
    let params = ParamsBuilder::new()
        .set("query", query)
        .set("page", page)
        .set("include_adult", false)
        .build();

    match scope {
        SearchScope::Multi => {
            annotated_page::<CatalogMedia>(ctx, user_id, "/search/multi", params).await
        }
        SearchScope::Movie => {
            annotated_page::<CatalogMovie>(ctx, user_id, "/search/movie", params).await
        }
        SearchScope::Tv => annotated_page::<CatalogTv>(ctx, user_id, "/search/tv", params).await,
    }
}

pub async fn recommendations(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    media: MediaReference,
    page: i64,
) -> AppResult<Paginated<MediaItem>> {
    let path = format!("/{}/{}/recommendations", media.media_type, media.id);
    let params = ParamsBuilder::new().set("page", page).build();

    // Recommendation entries carry their own media_type
    annotated_page::<CatalogMedia>(ctx, user_id, &path, params).await
}

pub async fn movie_details(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    movie_id: i64,
) -> AppResult<MovieDetails> {
    let params = ParamsBuilder::new()
        .set("append_to_response", "credits,videos")
        .build();
    let details: CatalogMovieDetails =
        catalog::fetch(ctx.catalog, &format!("/movie/{}", movie_id), params).await?;

    let favorites =
        media_favorites_map(ctx.favorites, &[MediaReference::movie(details.id)], user_id).await?;
    let map_ctx = MapContext {
        favorites: &favorites,
        user_id,
        images: ctx.images,
    };

    Ok(media_mapper::map_movie_details(details, &map_ctx))
}

pub async fn tv_details(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    tv_id: i64,
) -> AppResult<TvDetails> {
    let params = ParamsBuilder::new()
        .set("append_to_response", "credits,videos")
        .build();
    let details: CatalogTvDetails =
        catalog::fetch(ctx.catalog, &format!("/tv/{}", tv_id), params).await?;

    let favorites =
        media_favorites_map(ctx.favorites, &[MediaReference::tv(details.id)], user_id).await?;
    let map_ctx = MapContext {
        favorites: &favorites,
        user_id,
        images: ctx.images,
    };

    Ok(media_mapper::map_tv_details(details, &map_ctx))
}

pub async fn genres(catalog: &dyn CatalogClient, media_type: MediaType) -> AppResult<Vec<Genre>> {
    let list: CatalogGenres =
        catalog::fetch(catalog, &format!("/genre/{}/list", media_type), vec![]).await?;
    Ok(list.genres)
}

pub async fn person(
    catalog: &dyn CatalogClient,
    images: &ImageUrls,
    person_id: i64,
) -> AppResult<PersonDetails> {
    let person: CatalogPerson =
        catalog::fetch(catalog, &format!("/person/{}", person_id), vec![]).await?;
    Ok(media_mapper::map_person(person, images))
}

pub async fn person_credits(
    ctx: &MediaContext<'_>,
    user_id: Option<Uuid>,
    person_id: i64,
) -> AppResult<CombinedCredits> {
    let credits: CatalogCombinedCredits = catalog::fetch(
        ctx.catalog,
        &format!("/person/{}/combined_credits", person_id),
        vec![],
    )
    .await?;

    let references: Vec<MediaReference> = credits
        .cast
        .iter()
        .chain(credits.crew.iter())
        .filter_map(|credit| credit.media.reference())
        .collect();
    let favorites = media_favorites_map(ctx.favorites, &references, user_id).await?;

    let map_ctx = MapContext {
        favorites: &favorites,
        user_id,
        images: ctx.images,
    };

    Ok(media_mapper::map_combined_credits(credits, &map_ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::FavoriteStatus;
    use crate::services::catalog::MockCatalogClient;
    use crate::services::favorites_map::MockFavoriteLookup;
    use serde_json::{json, Value};

    fn images() -> ImageUrls {
        ImageUrls::new("https://image.tmdb.org/t/p/", "w500", "w1280", "w185")
    }

    fn movie_page(page: i64, ids: std::ops::Range<i64>) -> Value {
        let results: Vec<Value> = ids
            .map(|id| json!({"id": id, "title": format!("Movie {id}"), "poster_path": format!("/{id}.jpg")}))
            .collect();
        json!({"page": page, "results": results, "total_pages": 37, "total_results": 731})
    }

    fn has_param(params: &catalog::CatalogParams, key: &str, value: &str) -> bool {
        params.iter().any(|(k, v)| k == key && v == value)
    }

    #[tokio::test]
    async fn test_discover_page_two_marks_single_favorite() {
        let user_id = Uuid::new_v4();

        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .withf(|path, params| path == "/discover/movie" && has_param(params, "page", "2"))
            .times(1)
            .returning(|_, _| Ok(movie_page(2, 100..120)));

        let mut favorites = MockFavoriteLookup::new();
        favorites
            .expect_find_favorited()
            .withf(move |uid, medias| *uid == user_id && medias.len() == 20)
            .times(1)
            .returning(|_, _| Ok(vec![MediaReference::movie(107)]));

        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };
        let filter = DiscoverFilter {
            page: Some(2),
            ..Default::default()
        };

        let result = discover_movies(&ctx, Some(user_id), &filter).await.unwrap();

        assert_eq!(result.data.len(), 20);
        assert_eq!(result.pagination.current_page, 2);
        assert_eq!(result.pagination.total_pages, 37);
        assert_eq!(result.pagination.count, 731);

        let favorited: Vec<_> = result
            .data
            .iter()
            .filter(|item| item.is_favorite() == FavoriteStatus::Favorited)
            .collect();
        assert_eq!(favorited.len(), 1);
        assert_eq!(favorited[0].reference(), MediaReference::movie(107));
        assert!(result
            .data
            .iter()
            .all(|item| item.is_favorite() != FavoriteStatus::Unknown));
    }

    #[tokio::test]
    async fn test_anonymous_discover_never_queries_favorites() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .returning(|_, _| Ok(movie_page(1, 1..6)));

        let mut favorites = MockFavoriteLookup::new();
        favorites.expect_find_favorited().times(0);

        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };

        let result = discover_movies(&ctx, None, &DiscoverFilter::default())
            .await
            .unwrap();

        assert_eq!(result.data.len(), 5);
        let value = serde_json::to_value(&result).unwrap();
        for item in value["data"].as_array().unwrap() {
            assert_eq!(item["isFavorite"], Value::Null);
        }
    }

    #[tokio::test]
    async fn test_discover_forwards_filters() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .withf(|path, params| {
                path == "/discover/tv"
                    && has_param(params, "vote_average.gte", "7.5")
                    && has_param(params, "with_genres", "18,80")
                    && has_param(params, "sort_by", "vote_average.desc")
                    && !params.iter().any(|(k, _)| k == "include_video")
            })
            .times(1)
            .returning(|_, _| {
                Ok(json!({"page": 1, "results": [], "total_pages": 0, "total_results": 0}))
            });

        let favorites = MockFavoriteLookup::new();
        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };
        let filter = DiscoverFilter {
            page: None,
            sort_by: Some("vote_average.desc".to_string()),
            vote_average_gte: Some(7.5),
            vote_average_lte: None,
            with_genres: Some("18,80".to_string()),
        };

        let result = discover_tv(&ctx, Some(Uuid::new_v4()), &filter).await.unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn test_trending_all_mixes_types_and_skips_people() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .withf(|path, _| path == "/trending/all/week")
            .returning(|_, _| {
                Ok(json!({
                    "page": 1,
                    "results": [
                        {"media_type": "movie", "id": 5, "title": "A"},
                        {"media_type": "person", "id": 6, "name": "B"},
                        {"media_type": "tv", "id": 5, "name": "C"}
                    ],
                    "total_pages": 1,
                    "total_results": 3
                }))
            });

        let mut favorites = MockFavoriteLookup::new();
        favorites
            .expect_find_favorited()
            .withf(|_, medias| {
                medias == [MediaReference::movie(5), MediaReference::tv(5)].as_slice()
            })
            .times(1)
            .returning(|_, _| Ok(vec![MediaReference::tv(5)]));

        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };

        let result = trending(
            &ctx,
            Some(Uuid::new_v4()),
            TrendingScope::All,
            TimeWindow::Week,
            1,
        )
        .await
        .unwrap();

        assert_eq!(result.data.len(), 2);
        assert_eq!(result.data[0].is_favorite(), FavoriteStatus::NotFavorited);
        assert_eq!(result.data[1].is_favorite(), FavoriteStatus::Favorited);
    }

    #[tokio::test]
    async fn test_catalog_failure_skips_favorite_lookup() {
        let mut catalog = MockCatalogClient::new();
        catalog.expect_get().returning(|_, _| {
            Err(AppError::ExternalApi {
                status: 429,
                message: "rate limited".to_string(),
            })
        });

        let mut favorites = MockFavoriteLookup::new();
        favorites.expect_find_favorited().times(0);

        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };

        let result = search(&ctx, Some(Uuid::new_v4()), SearchScope::Movie, "alien", 1).await;
        assert!(matches!(result, Err(AppError::ExternalApi { status: 429, .. })));
    }

    #[tokio::test]
    async fn test_movie_details_requests_credits_and_videos() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .withf(|path, params| {
                path == "/movie/550" && has_param(params, "append_to_response", "credits,videos")
            })
            .returning(|_, _| Ok(json!({"id": 550, "title": "Fight Club"})));

        let mut favorites = MockFavoriteLookup::new();
        favorites
            .expect_find_favorited()
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };

        let details = movie_details(&ctx, Some(Uuid::new_v4()), 550).await.unwrap();
        assert_eq!(details.title, "Fight Club");
        assert_eq!(details.is_favorite, FavoriteStatus::NotFavorited);
    }

    #[tokio::test]
    async fn test_recommendations_path_uses_media_type() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .withf(|path, _| path == "/tv/1399/recommendations")
            .returning(|_, _| {
                Ok(json!({"page": 1, "results": [{"media_type": "tv", "id": 1, "name": "X"}], "total_pages": 1, "total_results": 1}))
            });

        let favorites = MockFavoriteLookup::new();
        let images = images();
        let ctx = MediaContext {
            catalog: &catalog,
            favorites: &favorites,
            images: &images,
        };

        let result = recommendations(&ctx, None, MediaReference::tv(1399), 1)
            .await
            .unwrap();
        assert_eq!(result.data.len(), 1);
    }

    #[tokio::test]
    async fn test_genres_unwraps_list() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_get()
            .withf(|path, _| path == "/genre/movie/list")
            .returning(|_, _| Ok(json!({"genres": [{"id": 28, "name": "Action"}]})));

        let genres = genres(&catalog, MediaType::Movie).await.unwrap();
        assert_eq!(
            genres,
            vec![Genre {
                id: 28,
                name: "Action".to_string()
            }]
        );
    }
}
