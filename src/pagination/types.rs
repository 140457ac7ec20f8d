//! Pagination cursor
//!
//! Two server conventions exist and one endpoint uses exactly one of them:
//! offset-style (`record_index`, `page_size`, `count`) and page-style
//! (`page`, `total_pages`). A payload with neither is the last page.

use crate::types::JsonObject;
use serde_json::Value;
use tracing::warn;

/// Query parameter carrying the offset of the next page
pub const RECORD_INDEX_PARAM: &str = "record_index";

/// Query parameter carrying the number of the next page
pub const PAGE_PARAM: &str = "page";

/// Position of a fetched page within its result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageCursor {
    /// Offset-style page
    Offset {
        /// Offset of the first record on this page
        record_index: i64,
        /// Records per page
        page_size: i64,
        /// Total records in the result set
        count: i64,
    },
    /// Page-style page
    Page {
        /// Number of this page
        page: i64,
        /// Total number of pages
        total_pages: i64,
    },
    /// No pagination fields
    #[default]
    None,
}

/// Cursor fields as they appear in a payload
///
/// Each field is read on its own; a field that is missing or not an integer
/// is treated as absent.
#[derive(Debug, Default)]
struct CursorFields {
    record_index: Option<i64>,
    page_size: Option<i64>,
    count: Option<i64>,
    page: Option<i64>,
    total_pages: Option<i64>,
}

impl CursorFields {
    fn read(map: &JsonObject) -> Self {
        let field = |key: &str| map.get(key).and_then(Value::as_i64);
        Self {
            record_index: field("record_index"),
            page_size: field("page_size"),
            count: field("count"),
            page: field("page"),
            total_pages: field("total_pages"),
        }
    }

    fn into_cursor(self, default_page: i64) -> PageCursor {
        if let Some(total_pages) = self.total_pages {
            return PageCursor::Page {
                page: self.page.unwrap_or(default_page),
                total_pages,
            };
        }

        if let Some(count) = self.count {
            return match self.page_size {
                Some(page_size) if page_size > 0 => PageCursor::Offset {
                    record_index: self.record_index.unwrap_or(0),
                    page_size,
                    count,
                },
                _ => {
                    warn!(count, page_size = ?self.page_size, "count without a usable page_size, not paginating");
                    PageCursor::None
                }
            };
        }

        PageCursor::None
    }
}

impl PageCursor {
    /// Read the cursor from a payload's top-level fields
    ///
    /// A page-style payload without `page` is taken to be the first page.
    pub fn from_map(map: &JsonObject) -> Self {
        Self::from_map_at(map, 1)
    }

    /// Read the cursor from a page fetched as page number `requested_page`
    ///
    /// `requested_page` stands in for a missing `page` field.
    pub fn from_map_at(map: &JsonObject, requested_page: i64) -> Self {
        CursorFields::read(map).into_cursor(requested_page)
    }

    /// Read only the cursor fields from a raw JSON body
    ///
    /// Bodies that are not a JSON object are treated as the last page.
    pub fn from_json_bytes(body: &[u8]) -> Self {
        Self::from_json_bytes_at(body, 1)
    }

    /// Like `from_json_bytes`, for a page fetched as page number `requested_page`
    pub fn from_json_bytes_at(body: &[u8], requested_page: i64) -> Self {
        match serde_json::from_slice::<JsonObject>(body) {
            Ok(map) => Self::from_map_at(&map, requested_page),
            Err(e) => {
                warn!(error = %e, "could not read pagination fields, not paginating");
                PageCursor::None
            }
        }
    }

    /// Pages left after this one; zero or less means done
    pub fn remaining(&self) -> i64 {
        match *self {
            PageCursor::Offset {
                record_index,
                page_size,
                count,
            } => count.saturating_sub(record_index.saturating_add(page_size)),
            PageCursor::Page { page, total_pages } => total_pages.saturating_sub(page),
            PageCursor::None => 0,
        }
    }

    /// Whether another page should be requested
    pub fn has_next(&self) -> bool {
        self.remaining() > 0
    }

    /// Query parameter and value requesting the page after this one
    pub fn next_param(&self) -> Option<(&'static str, i64)> {
        match *self {
            PageCursor::Offset {
                record_index,
                page_size,
                ..
            } => Some((RECORD_INDEX_PARAM, record_index.saturating_add(page_size))),
            PageCursor::Page { page, .. } => Some((PAGE_PARAM, page.saturating_add(1))),
            PageCursor::None => None,
        }
    }

    /// Page number the next page is requested as, for page-style cursors
    pub fn next_page_number(&self) -> Option<i64> {
        match self.next_param() {
            Some((PAGE_PARAM, page)) => Some(page),
            _ => None,
        }
    }
}
