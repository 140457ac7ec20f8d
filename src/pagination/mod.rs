//! Pagination module
//!
//! Supports: Offset (`record_index`/`page_size`/`count`), Page Number (`page`/`total_pages`)
//!
//! # Overview
//!
//! Auto-advancing requests are driven by the `Paginator`. After each page it
//! reads the `PageCursor` from the response, requests the next page with a
//! fresh GET while pages remain, and appends each page's collection to the
//! first page's entity. The merged collection is located by the
//! `CollectionResolver`.

mod engine;
mod resolver;
mod types;

pub use engine::Paginator;
pub use resolver::{resolve_collection, CollectionResolver, KnownCollection, Resolution};
pub use types::{PageCursor, PAGE_PARAM, RECORD_INDEX_PARAM};
