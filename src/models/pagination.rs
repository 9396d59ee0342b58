use serde::Serialize;

use super::catalog::CatalogPage;

/// Page metadata returned with every list
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEnvelope {
    pub current_page: i64,
    pub total_pages: i64,
    pub count: i64,
}

impl PaginationEnvelope {
    /// Copies the catalog's own page metadata verbatim
    pub fn from_upstream<T>(page: &CatalogPage<T>) -> Self {
        Self {
            current_page: page.page,
            total_pages: page.total_pages,
            count: page.total_results,
        }
    }

    /// Envelope for a locally stored list.
    ///
    /// `current_page` is echoed as requested and is not checked against
    /// `total_pages`.
    pub fn local(current_page: i64, count: i64, page_size: i64) -> Self {
        let total_pages = if count <= 0 || page_size <= 0 {
            0
        } else {
            (count + page_size - 1) / page_size
        };

        Self {
            current_page,
            total_pages,
            count: count.max(0),
        }
    }
}

/// `{ data, pagination }` response body
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationEnvelope,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: PaginationEnvelope) -> Self {
        Self { data, pagination }
    }
}

/// Skip/limit for a 1-based page. The offset saturates, so a page far past
/// the end reads as an empty page instead of overflowing.
pub fn page_bounds(page: i64, page_size: i64) -> (i64, i64) {
    let offset = page.saturating_sub(1).max(0).saturating_mul(page_size);
    (offset, page_size)
}
