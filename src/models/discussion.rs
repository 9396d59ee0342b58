use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::favorite::MediaSnapshot;
use super::media::MediaType;
use super::user::AuthorProfile;

/// User-written text attached to a catalog item.
///
/// Comments and reviews share this shape and live in separate tables.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct MediaPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub media_id: i64,
    pub media_type: MediaType,
    pub media_title: String,
    pub media_poster: Option<String>,
    pub media_release_date: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post together with its author's public profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthoredPost {
    #[serde(flatten)]
    pub post: MediaPost,
    pub author: AuthorProfile,
}

/// Request body for creating a comment or review
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(flatten)]
    pub media: MediaSnapshot,
    pub content: String,
}
