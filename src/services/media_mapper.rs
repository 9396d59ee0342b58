use uuid::Uuid;

use crate::config::Config;
use crate::models::{
    CastMember, CatalogCast, CatalogCombinedCredits, CatalogCredit, CatalogCredits, CatalogMedia,
    CatalogMovie, CatalogMovieDetails, CatalogPerson, CatalogTv, CatalogTvDetails, CatalogVideos,
    CombinedCredits, Creator, CreditItem, MediaItem, MediaReference, MovieDetails, MovieItem,
    PersonDetails, Season, TvDetails, TvItem, Video,
};

use super::favorites_map::FavoritesMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
}

/// Fully qualified image prefixes, one per image kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    poster: String,
    backdrop: String,
    profile: String,
}

impl ImageUrls {
    pub fn new(base_url: &str, poster_size: &str, backdrop_size: &str, profile_size: &str) -> Self {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Self {
            poster: format!("{}{}", base, poster_size),
            backdrop: format!("{}{}", base, backdrop_size),
            profile: format!("{}{}", base, profile_size),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.image_base_url,
            &config.poster_size,
            &config.backdrop_size,
            &config.profile_size,
        )
    }

    /// Prefixes a catalog image path. Missing or empty paths stay `None`.
    pub fn resolve(&self, kind: ImageKind, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;

        let prefix = match kind {
            ImageKind::Poster => &self.poster,
            ImageKind::Backdrop => &self.backdrop,
            ImageKind::Profile => &self.profile,
        };

        if path.starts_with('/') {
            Some(format!("{}{}", prefix, path))
        } else {
            Some(format!("{}/{}", prefix, path))
        }
    }

    fn poster(&self, path: &Option<String>) -> Option<String> {
        self.resolve(ImageKind::Poster, path.as_deref())
    }

    fn backdrop(&self, path: &Option<String>) -> Option<String> {
        self.resolve(ImageKind::Backdrop, path.as_deref())
    }

    fn profile(&self, path: &Option<String>) -> Option<String> {
        self.resolve(ImageKind::Profile, path.as_deref())
    }
}

/// Everything a mapper needs besides the record itself
#[derive(Debug, Clone, Copy)]
pub struct MapContext<'a> {
    pub favorites: &'a FavoritesMap,
    pub user_id: Option<Uuid>,
    pub images: &'a ImageUrls,
}

/// Upstream list entry that can become a `MediaItem`
pub trait UpstreamMedia {
    /// `None` for entries that are not movies or TV shows
    fn reference(&self) -> Option<MediaReference>;

    fn into_item(self, ctx: &MapContext<'_>) -> Option<MediaItem>;
}

impl UpstreamMedia for CatalogMovie {
    fn reference(&self) -> Option<MediaReference> {
        Some(MediaReference::movie(self.id))
    }

    fn into_item(self, ctx: &MapContext<'_>) -> Option<MediaItem> {
        Some(MediaItem::Movie(map_movie(self, ctx)))
    }
}

impl UpstreamMedia for CatalogTv {
    fn reference(&self) -> Option<MediaReference> {
        Some(MediaReference::tv(self.id))
    }

    fn into_item(self, ctx: &MapContext<'_>) -> Option<MediaItem> {
        Some(MediaItem::Tv(map_tv(self, ctx)))
    }
}

impl UpstreamMedia for CatalogMedia {
    fn reference(&self) -> Option<MediaReference> {
        match self {
            CatalogMedia::Movie(movie) => movie.reference(),
            CatalogMedia::Tv(tv) => tv.reference(),
            CatalogMedia::Other => None,
        }
    }

    fn into_item(self, ctx: &MapContext<'_>) -> Option<MediaItem> {
        match self {
            CatalogMedia::Movie(movie) => movie.into_item(ctx),
            CatalogMedia::Tv(tv) => tv.into_item(ctx),
            CatalogMedia::Other => None,
        }
    }
}

pub fn map_movie(movie: CatalogMovie, ctx: &MapContext<'_>) -> MovieItem {
    let is_favorite = ctx
        .favorites
        .status_for(&MediaReference::movie(movie.id), ctx.user_id);

    MovieItem {
        id: movie.id,
        title: movie.title,
        original_title: movie.original_title,
        overview: movie.overview,
        popularity: movie.popularity,
        vote_average: movie.vote_average,
        vote_count: movie.vote_count,
        poster_path: ctx.images.poster(&movie.poster_path),
        backdrop_path: ctx.images.backdrop(&movie.backdrop_path),
        release_date: movie.release_date,
        genre_ids: movie.genre_ids,
        adult: movie.adult,
        original_language: movie.original_language,
        video: movie.video,
        is_favorite,
    }
}

pub fn map_tv(tv: CatalogTv, ctx: &MapContext<'_>) -> TvItem {
    let is_favorite = ctx
        .favorites
        .status_for(&MediaReference::tv(tv.id), ctx.user_id);

    TvItem {
        id: tv.id,
        name: tv.name,
        original_name: tv.original_name,
        overview: tv.overview,
        popularity: tv.popularity,
        vote_average: tv.vote_average,
        vote_count: tv.vote_count,
        poster_path: ctx.images.poster(&tv.poster_path),
        backdrop_path: ctx.images.backdrop(&tv.backdrop_path),
        first_air_date: tv.first_air_date,
        genre_ids: tv.genre_ids,
        origin_country: tv.origin_country,
        original_language: tv.original_language,
        adult: tv.adult,
        is_favorite,
    }
}

/// Maps a page of upstream entries, dropping the ones that are not media
pub fn map_items<T: UpstreamMedia>(items: Vec<T>, ctx: &MapContext<'_>) -> Vec<MediaItem> {
    items
        .into_iter()
        .filter_map(|item| item.into_item(ctx))
        .collect()
}

fn map_cast(credits: Option<CatalogCredits>, images: &ImageUrls) -> Vec<CastMember> {
    credits
        .unwrap_or_default()
        .cast
        .into_iter()
        .map(|cast: CatalogCast| CastMember {
            id: cast.id,
            name: cast.name,
            character: cast.character,
            profile_path: images.profile(&cast.profile_path),
            order: cast.order,
        })
        .collect()
}

fn map_videos(videos: Option<CatalogVideos>) -> Vec<Video> {
    videos
        .unwrap_or_default()
        .results
        .into_iter()
        .map(|video| Video {
            key: video.key,
            name: video.name,
            site: video.site,
            video_type: video.video_type,
            official: video.official,
        })
        .collect()
}

pub fn map_movie_details(details: CatalogMovieDetails, ctx: &MapContext<'_>) -> MovieDetails {
    let is_favorite = ctx
        .favorites
        .status_for(&MediaReference::movie(details.id), ctx.user_id);

    MovieDetails {
        id: details.id,
        title: details.title,
        original_title: details.original_title,
        overview: details.overview,
        tagline: details.tagline,
        status: details.status,
        homepage: details.homepage,
        runtime: details.runtime,
        budget: details.budget,
        revenue: details.revenue,
        popularity: details.popularity,
        vote_average: details.vote_average,
        vote_count: details.vote_count,
        poster_path: ctx.images.poster(&details.poster_path),
        backdrop_path: ctx.images.backdrop(&details.backdrop_path),
        release_date: details.release_date,
        genres: details.genres,
        adult: details.adult,
        original_language: details.original_language,
        video: details.video,
        cast: map_cast(details.credits, ctx.images),
        videos: map_videos(details.videos),
        is_favorite,
    }
}

pub fn map_tv_details(details: CatalogTvDetails, ctx: &MapContext<'_>) -> TvDetails {
    let is_favorite = ctx
        .favorites
        .status_for(&MediaReference::tv(details.id), ctx.user_id);

    let seasons = details
        .seasons
        .into_iter()
        .map(|season| Season {
            id: season.id,
            name: season.name,
            season_number: season.season_number,
            episode_count: season.episode_count,
            air_date: season.air_date,
            poster_path: ctx.images.poster(&season.poster_path),
            overview: season.overview,
        })
        .collect();

    let created_by = details
        .created_by
        .into_iter()
        .map(|creator| Creator {
            id: creator.id,
            name: creator.name,
            profile_path: ctx.images.profile(&creator.profile_path),
        })
        .collect();

    TvDetails {
        id: details.id,
        name: details.name,
        original_name: details.original_name,
        overview: details.overview,
        tagline: details.tagline,
        status: details.status,
        homepage: details.homepage,
        number_of_seasons: details.number_of_seasons,
        number_of_episodes: details.number_of_episodes,
        episode_run_time: details.episode_run_time,
        first_air_date: details.first_air_date,
        last_air_date: details.last_air_date,
        popularity: details.popularity,
        vote_average: details.vote_average,
        vote_count: details.vote_count,
        poster_path: ctx.images.poster(&details.poster_path),
        backdrop_path: ctx.images.backdrop(&details.backdrop_path),
        genres: details.genres,
        origin_country: details.origin_country,
        original_language: details.original_language,
        adult: details.adult,
        seasons,
        created_by,
        cast: map_cast(details.credits, ctx.images),
        videos: map_videos(details.videos),
        is_favorite,
    }
}

pub fn map_person(person: CatalogPerson, images: &ImageUrls) -> PersonDetails {
    PersonDetails {
        id: person.id,
        name: person.name,
        biography: person.biography,
        birthday: person.birthday,
        deathday: person.deathday,
        place_of_birth: person.place_of_birth,
        profile_path: images.profile(&person.profile_path),
        known_for_department: person.known_for_department,
        gender: person.gender,
        popularity: person.popularity,
        also_known_as: person.also_known_as,
        imdb_id: person.imdb_id,
    }
}

fn map_credit(credit: CatalogCredit, ctx: &MapContext<'_>) -> Option<CreditItem> {
    let media = credit.media.into_item(ctx)?;

    Some(CreditItem {
        media,
        character: credit.character,
        job: credit.job,
        credit_id: credit.credit_id,
    })
}

pub fn map_combined_credits(
    credits: CatalogCombinedCredits,
    ctx: &MapContext<'_>,
) -> CombinedCredits {
    CombinedCredits {
        cast: credits
            .cast
            .into_iter()
            .filter_map(|c| map_credit(c, ctx))
            .collect(),
        crew: credits
            .crew
            .into_iter()
            .filter_map(|c| map_credit(c, ctx))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FavoriteStatus, MediaType};
    use serde_json::json;

    fn images() -> ImageUrls {
        ImageUrls::new("https://image.tmdb.org/t/p/", "w500", "w1280", "w185")
    }

    fn movie(id: i64, poster: Option<&str>) -> CatalogMovie {
        serde_json::from_value(json!({
            "id": id,
            "title": "Inception",
            "original_title": "Inception",
            "poster_path": poster,
            "backdrop_path": "/s3TBrRGB1iav7gFOCNx3H31MoES.jpg",
            "vote_average": 8.4,
            "vote_count": 35000,
            "release_date": "2010-07-15",
            "genre_ids": [28],
            "original_language": "en"
        }))
        .unwrap()
    }

    fn tv(id: i64) -> CatalogTv {
        serde_json::from_value(json!({
            "id": id,
            "name": "Dark",
            "original_name": "Dark",
            "first_air_date": "2017-12-01",
            "origin_country": ["DE"],
            "profile_path": "/ignored.jpg"
        }))
        .unwrap()
    }

    #[test]
    fn test_image_kinds_use_distinct_bases() {
        let images = images();
        assert_eq!(
            images.resolve(ImageKind::Poster, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            images.resolve(ImageKind::Backdrop, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/abc.jpg")
        );
        assert_eq!(
            images.resolve(ImageKind::Profile, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w185/abc.jpg")
        );
    }

    #[test]
    fn test_missing_image_stays_null() {
        let images = images();
        assert_eq!(images.resolve(ImageKind::Poster, None), None);
        assert_eq!(images.resolve(ImageKind::Poster, Some("")), None);
        assert_eq!(images.resolve(ImageKind::Backdrop, Some("  ")), None);
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let images = ImageUrls::new("https://img.example", "w342", "w780", "h632");
        assert_eq!(
            images.resolve(ImageKind::Poster, Some("abc.jpg")).as_deref(),
            Some("https://img.example/w342/abc.jpg")
        );
    }

    #[test]
    fn test_movie_fields_are_renamed() {
        let favorites = FavoritesMap::default();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: None,
            images: &images,
        };

        let item = MediaItem::Movie(map_movie(movie(27205, None), &ctx));
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["mediaType"], "movie");
        assert_eq!(value["voteAverage"], 8.4);
        assert_eq!(value["originalLanguage"], "en");
        assert_eq!(value["releaseDate"], "2010-07-15");
        assert_eq!(value["posterPath"], json!(null));
        assert_eq!(
            value["backdropPath"],
            "https://image.tmdb.org/t/p/w1280/s3TBrRGB1iav7gFOCNx3H31MoES.jpg"
        );
        assert_eq!(value["isFavorite"], json!(null));
        assert!(value.get("vote_average").is_none());
    }

    #[test]
    fn test_anonymous_items_are_unknown() {
        let favorites: FavoritesMap = vec![MediaReference::movie(1)].into_iter().collect();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: None,
            images: &images,
        };

        let items = map_items(vec![movie(1, None), movie(2, None)], &ctx);
        assert!(items
            .iter()
            .all(|item| item.is_favorite() == FavoriteStatus::Unknown));
    }

    #[test]
    fn test_colliding_ids_only_mark_matching_type() {
        let favorites: FavoritesMap = vec![MediaReference::movie(99)].into_iter().collect();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: Some(Uuid::new_v4()),
            images: &images,
        };

        let items = map_items(
            vec![
                CatalogMedia::Movie(movie(99, Some("/p.jpg"))),
                CatalogMedia::Tv(tv(99)),
            ],
            &ctx,
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].reference().media_type, MediaType::Movie);
        assert_eq!(items[0].is_favorite(), FavoriteStatus::Favorited);
        assert_eq!(items[1].reference().media_type, MediaType::Tv);
        assert_eq!(items[1].is_favorite(), FavoriteStatus::NotFavorited);
    }

    #[test]
    fn test_mixed_lists_skip_people() {
        let favorites = FavoritesMap::default();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: Some(Uuid::new_v4()),
            images: &images,
        };

        let items = map_items(
            vec![CatalogMedia::Other, CatalogMedia::Tv(tv(1))],
            &ctx,
        );

        assert_eq!(items.len(), 1);
        let value = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(value["name"], "Dark");
        assert_eq!(value["isFavorite"], false);
        assert!(value.get("title").is_none());
        assert!(value.get("video").is_none());
    }

    #[test]
    fn test_movie_details_map_cast_profiles() {
        let details: CatalogMovieDetails = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "runtime": 136,
            "genres": [{"id": 28, "name": "Action"}],
            "credits": {"cast": [
                {"id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/k.jpg", "order": 0},
                {"id": 2975, "name": "Laurence Fishburne", "character": "Morpheus", "profile_path": null, "order": 1}
            ]},
            "videos": {"results": [{"key": "vKQi3bBA1y8", "name": "Trailer", "site": "YouTube", "type": "Trailer", "official": true}]}
        }))
        .unwrap();

        let favorites: FavoritesMap = vec![MediaReference::movie(603)].into_iter().collect();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: Some(Uuid::new_v4()),
            images: &images,
        };

        let mapped = map_movie_details(details, &ctx);
        assert_eq!(mapped.is_favorite, FavoriteStatus::Favorited);
        assert_eq!(
            mapped.cast[0].profile_path.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/k.jpg")
        );
        assert_eq!(mapped.cast[1].profile_path, None);
        assert_eq!(mapped.videos[0].video_type, "Trailer");
        assert_eq!(mapped.runtime, Some(136));
    }

    #[test]
    fn test_tv_details_without_appended_data() {
        let details: CatalogTvDetails = serde_json::from_value(json!({
            "id": 1396,
            "name": "Breaking Bad",
            "number_of_seasons": 5,
            "seasons": [{"id": 3572, "name": "Season 1", "season_number": 1, "episode_count": 7, "poster_path": "/s1.jpg"}]
        }))
        .unwrap();

        let favorites = FavoritesMap::default();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: None,
            images: &images,
        };

        let mapped = map_tv_details(details, &ctx);
        assert!(mapped.cast.is_empty());
        assert!(mapped.videos.is_empty());
        assert_eq!(mapped.is_favorite, FavoriteStatus::Unknown);
        assert_eq!(
            mapped.seasons[0].poster_path.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/s1.jpg")
        );
    }

    #[test]
    fn test_combined_credits_keep_roles_and_favorites() {
        let credits: CatalogCombinedCredits = serde_json::from_value(json!({
            "cast": [
                {"media_type": "movie", "id": 603, "title": "The Matrix", "character": "Neo", "credit_id": "c1"},
                {"media_type": "tv", "id": 603, "name": "Matrix Show", "character": "Host", "credit_id": "c2"}
            ],
            "crew": []
        }))
        .unwrap();

        let favorites: FavoritesMap = vec![MediaReference::tv(603)].into_iter().collect();
        let images = images();
        let ctx = MapContext {
            favorites: &favorites,
            user_id: Some(Uuid::new_v4()),
            images: &images,
        };

        let mapped = map_combined_credits(credits, &ctx);
        assert_eq!(mapped.cast.len(), 2);
        assert_eq!(mapped.cast[0].media.is_favorite(), FavoriteStatus::NotFavorited);
        assert_eq!(mapped.cast[1].media.is_favorite(), FavoriteStatus::Favorited);

        let value = serde_json::to_value(&mapped.cast[0]).unwrap();
        assert_eq!(value["character"], "Neo");
        assert_eq!(value["creditId"], "c1");
        assert_eq!(value["mediaType"], "movie");
    }
}
