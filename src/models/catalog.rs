//! Raw records returned by the upstream catalog (snake_case, TMDB v3 shape).

use serde::Deserialize;

use super::media::Genre;

/// One page of upstream results
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage<T> {
    pub page: i64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

// ============================================================================
// List entries
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub video: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTv {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub adult: bool,
}

/// Entry of a mixed list (trending, multi search, recommendations, credits)
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum CatalogMedia {
    Movie(CatalogMovie),
    Tv(CatalogTv),
    /// People and anything else the catalog mixes in
    #[serde(other)]
    Other,
}

// ============================================================================
// Details
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCast {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogCredits {
    #[serde(default)]
    pub cast: Vec<CatalogCast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVideo {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogVideos {
    #[serde(default)]
    pub results: Vec<CatalogVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogMovieDetails {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub credits: Option<CatalogCredits>,
    #[serde(default)]
    pub videos: Option<CatalogVideos>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSeason {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub season_number: i64,
    #[serde(default)]
    pub episode_count: i64,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCreator {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTvDetails {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub number_of_seasons: i64,
    #[serde(default)]
    pub number_of_episodes: i64,
    #[serde(default)]
    pub episode_run_time: Vec<i64>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub seasons: Vec<CatalogSeason>,
    #[serde(default)]
    pub created_by: Vec<CatalogCreator>,
    #[serde(default)]
    pub credits: Option<CatalogCredits>,
    #[serde(default)]
    pub videos: Option<CatalogVideos>,
}

// ============================================================================
// People
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPerson {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub gender: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCredit {
    #[serde(flatten)]
    pub media: CatalogMedia,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub credit_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogCombinedCredits {
    #[serde(default)]
    pub cast: Vec<CatalogCredit>,
    #[serde(default)]
    pub crew: Vec<CatalogCredit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogGenres {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_page_deserialization() {
        let json = r#"{
            "page": 2,
            "results": [{
                "id": 27205,
                "title": "Inception",
                "original_title": "Inception",
                "poster_path": "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg",
                "backdrop_path": null,
                "release_date": "2010-07-15",
                "vote_average": 8.4,
                "vote_count": 35000,
                "genre_ids": [28, 878],
                "original_language": "en"
            }],
            "total_pages": 500,
            "total_results": 10000
        }"#;

        let page: CatalogPage<CatalogMovie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 500);
        assert_eq!(page.results[0].id, 27205);
        assert_eq!(page.results[0].genre_ids, vec![28, 878]);
        assert_eq!(page.results[0].backdrop_path, None);
        assert!(!page.results[0].video);
    }

    #[test]
    fn test_mixed_entries_dispatch_on_media_type() {
        let json = r#"[
            {"media_type": "movie", "id": 1, "title": "A"},
            {"media_type": "tv", "id": 2, "name": "B", "origin_country": ["GB"]},
            {"media_type": "person", "id": 3, "name": "C", "known_for": []}
        ]"#;

        let entries: Vec<CatalogMedia> = serde_json::from_str(json).unwrap();
        assert!(matches!(&entries[0], CatalogMedia::Movie(m) if m.title == "A"));
        assert!(matches!(&entries[1], CatalogMedia::Tv(t) if t.origin_country == vec!["GB"]));
        assert!(matches!(entries[2], CatalogMedia::Other));
    }

    #[test]
    fn test_combined_credit_keeps_role_fields() {
        let json = r#"{
            "cast": [{"media_type": "movie", "id": 603, "title": "The Matrix", "character": "Neo", "credit_id": "52fe"}],
            "crew": [{"media_type": "tv", "id": 9, "name": "Show", "job": "Producer", "credit_id": "53aa"}]
        }"#;

        let credits: CatalogCombinedCredits = serde_json::from_str(json).unwrap();
        assert_eq!(credits.cast[0].character.as_deref(), Some("Neo"));
        assert!(matches!(credits.cast[0].media, CatalogMedia::Movie(ref m) if m.id == 603));
        assert_eq!(credits.crew[0].job.as_deref(), Some("Producer"));
        assert!(matches!(credits.crew[0].media, CatalogMedia::Tv(_)));
    }
}
