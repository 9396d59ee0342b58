use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::MediaType;

/// A catalog item saved by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub media_id: i64,
    pub media_type: MediaType,
    pub media_title: String,
    pub media_poster: Option<String>,
    pub media_release_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of the catalog item stored alongside a favorite, comment or review
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSnapshot {
    pub media_id: i64,
    pub media_type: MediaType,
    pub media_title: String,
    #[serde(default)]
    pub media_poster: Option<String>,
    #[serde(default)]
    pub media_release_date: Option<String>,
}
