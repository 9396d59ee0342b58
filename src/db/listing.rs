//! Single round-trip page queries for locally stored lists.
//!
//! The filtered set feeds two sub-selects in one statement: the total count
//! and the requested page aggregated as JSON. Pages are ordered by
//! `(created_at, id)` so they stay stable while rows are inserted.

use serde::de::DeserializeOwned;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::models::{page_bounds, MediaReference};

/// Which rows of a list to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Rows owned by a user
    Owner(Uuid),
    /// Rows attached to a catalog item
    Media(MediaReference),
}

impl ListScope {
    /// `WHERE` clause over alias `r` and the number of parameters it binds
    fn filter(&self) -> (&'static str, usize) {
        match self {
            ListScope::Owner(_) => ("r.user_id = $1", 1),
            ListScope::Media(_) => ("r.media_id = $1 AND r.media_type = $2", 2),
        }
    }
}

/// One page of rows plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub count: i64,
}

/// Builds the combined count + page statement for `source`.
///
/// `source` must select from the list table aliased `r` and expose
/// `created_at` and `id` columns.
pub(crate) fn page_sql(source: &str, scope: &ListScope) -> String {
    let (filter, bound) = scope.filter();
    let offset_param = bound + 1;
    let limit_param = bound + 2;

    format!(
        "WITH filtered AS ({source} WHERE {filter}), \
         page AS (SELECT * FROM filtered ORDER BY created_at, id OFFSET ${offset_param} LIMIT ${limit_param}) \
         SELECT (SELECT COUNT(*) FROM filtered) AS count, \
                COALESCE((SELECT json_agg(p ORDER BY p.created_at, p.id) FROM page p), '[]'::json) AS data"
    )
}

/// Runs the page statement; `page` is 1-based and is not clamped here.
pub(crate) async fn fetch_page<T>(
    pool: &PgPool,
    source: &str,
    scope: ListScope,
    page: i64,
    page_size: i64,
) -> Result<ListPage<T>, sqlx::Error>
where
    T: DeserializeOwned + Send + Unpin + 'static,
{
    let sql = page_sql(source, &scope);
    let (offset, limit) = page_bounds(page, page_size);

    let query = sqlx::query_as::<_, (i64, Json<Vec<T>>)>(&sql);
    let query = match scope {
        ListScope::Owner(user_id) => query.bind(user_id),
        ListScope::Media(media) => query.bind(media.id).bind(media.media_type),
    };

    let (count, Json(items)) = query.bind(offset).bind(limit).fetch_one(pool).await?;

    Ok(ListPage { items, count })
}
