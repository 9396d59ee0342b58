use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// Kind of catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a catalog item without its full record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReference {
    pub id: i64,
    pub media_type: MediaType,
}

impl MediaReference {
    pub fn new(id: i64, media_type: MediaType) -> Self {
        Self { id, media_type }
    }

    pub fn movie(id: i64) -> Self {
        Self::new(id, MediaType::Movie)
    }

    pub fn tv(id: i64) -> Self {
        Self::new(id, MediaType::Tv)
    }
}

/// Favorite state of an item for the requesting user.
///
/// `Unknown` is reserved for anonymous requests and serializes as `null`;
/// authenticated requests always resolve to one of the boolean states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteStatus {
    #[default]
    Unknown,
    NotFavorited,
    Favorited,
}

impl Serialize for FavoriteStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FavoriteStatus::Unknown => serializer.serialize_none(),
            FavoriteStatus::NotFavorited => serializer.serialize_bool(false),
            FavoriteStatus::Favorited => serializer.serialize_bool(true),
        }
    }
}

/// Movie entry of a media list
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieItem {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub genre_ids: Vec<i64>,
    pub adult: bool,
    pub original_language: Option<String>,
    pub video: bool,
    pub is_favorite: FavoriteStatus,
}

/// TV entry of a media list
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TvItem {
    pub id: i64,
    pub name: String,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub genre_ids: Vec<i64>,
    pub origin_country: Vec<String>,
    pub original_language: Option<String>,
    pub adult: bool,
    pub is_favorite: FavoriteStatus,
}

/// Normalized media list entry, tagged by `mediaType`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "mediaType", rename_all = "lowercase")]
pub enum MediaItem {
    Movie(MovieItem),
    Tv(TvItem),
}

impl MediaItem {
    pub fn reference(&self) -> MediaReference {
        match self {
            MediaItem::Movie(movie) => MediaReference::movie(movie.id),
            MediaItem::Tv(tv) => MediaReference::tv(tv.id),
        }
    }

    pub fn is_favorite(&self) -> FavoriteStatus {
        match self {
            MediaItem::Movie(movie) => movie.is_favorite,
            MediaItem::Tv(tv) => tv.is_favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub official: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: i64,
    pub name: String,
    pub season_number: i64,
    pub episode_count: i64,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: i64,
    pub name: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub runtime: Option<i64>,
    pub budget: i64,
    pub revenue: i64,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<Genre>,
    pub adult: bool,
    pub original_language: Option<String>,
    pub video: bool,
    pub cast: Vec<CastMember>,
    pub videos: Vec<Video>,
    pub is_favorite: FavoriteStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvDetails {
    pub id: i64,
    pub name: String,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub number_of_seasons: i64,
    pub number_of_episodes: i64,
    pub episode_run_time: Vec<i64>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<Genre>,
    pub origin_country: Vec<String>,
    pub original_language: Option<String>,
    pub adult: bool,
    pub seasons: Vec<Season>,
    pub created_by: Vec<Creator>,
    pub cast: Vec<CastMember>,
    pub videos: Vec<Video>,
    pub is_favorite: FavoriteStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub id: i64,
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub gender: i64,
    pub popularity: f64,
    pub also_known_as: Vec<String>,
    pub imdb_id: Option<String>,
}

/// A person's role on a movie or show
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditItem {
    #[serde(flatten)]
    pub media: MediaItem,
    pub character: Option<String>,
    pub job: Option<String>,
    pub credit_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombinedCredits {
    pub cast: Vec<CreditItem>,
    pub crew: Vec<CreditItem>,
}
