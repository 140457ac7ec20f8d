//! Pagination engine
//!
//! Fetches pages one after another. Each continuation page is a fresh,
//! freshly signed GET built from the caller's original parameters plus the
//! cursor parameter. Every fetched page is merged. Any failure aborts the run
//! and drops what was merged.

use super::resolver::CollectionResolver;
use super::types::PageCursor;
use crate::decode::{Entity, Response};
use crate::error::Result;
use crate::http::{Dispatcher, ResponseSink};
use crate::types::{ApiRequest, Method, Params};
use tracing::{debug, warn};

/// Drives auto-advancing requests through a dispatcher
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Paginator<'a> {
    /// Create a paginator over a dispatcher
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetch every page and merge their collections into the first page's entity
    pub async fn fetch_all(&self, request: &ApiRequest) -> Result<Response> {
        let mut response = self
            .dispatcher
            .fetch(
                &request.path,
                request.params.clone(),
                request.method,
                &request.headers,
            )
            .await?;

        let mut cursor = response.entity().map(Entity::cursor).unwrap_or_default();
        let mut resolver = CollectionResolver::new(request.collection_key.clone());
        let mut pages = 1;

        while let Some(params) = continuation(&request.params, &cursor) {
            let requested_page = cursor.next_page_number().unwrap_or(1);
            let next = self
                .dispatcher
                .fetch(&request.path, params, Method::GET, &request.headers)
                .await?;
            pages += 1;

            let next_cursor = next
                .entity()
                .map(|entity| entity.cursor_at(requested_page))
                .unwrap_or_default();

            match (response.entity_mut(), next.into_entity()) {
                (Some(accumulated), Some(page)) => {
                    let added = resolver.merge(accumulated, page)?;
                    debug!(page = pages, added, remaining = next_cursor.remaining(), "merged page");
                }
                _ => debug!(page = pages, "no entity to merge"),
            }

            if next_cursor == cursor {
                warn!(path = %request.path, ?cursor, "page did not advance, stopping");
                break;
            }
            cursor = next_cursor;
        }

        debug!(path = %request.path, pages, "pagination complete");
        Ok(response)
    }

    /// Stream every page's raw body to `sink`, in order
    pub async fn stream_all(
        &self,
        request: &ApiRequest,
        sink: &mut dyn ResponseSink,
    ) -> Result<()> {
        let body = self
            .dispatcher
            .stream_page(
                &request.path,
                request.params.clone(),
                request.method,
                &request.headers,
                sink,
                true,
            )
            .await?;
        let mut cursor = read_cursor(body.as_deref(), 1);
        let mut pages = 1;

        while let Some(params) = continuation(&request.params, &cursor) {
            let requested_page = cursor.next_page_number().unwrap_or(1);
            let body = self
                .dispatcher
                .stream_page(&request.path, params, Method::GET, &request.headers, sink, true)
                .await?;
            pages += 1;

            let next_cursor = read_cursor(body.as_deref(), requested_page);
            if next_cursor == cursor {
                warn!(path = %request.path, ?cursor, "page did not advance, stopping");
                break;
            }
            cursor = next_cursor;
        }

        debug!(path = %request.path, pages, "streaming complete");
        Ok(())
    }
}

/// Parameters for the page after `cursor`, or `None` when no pages remain
fn continuation(base: &Params, cursor: &PageCursor) -> Option<Params> {
    if !cursor.has_next() {
        return None;
    }
    let (name, value) = cursor.next_param()?;
    let mut params = base.clone();
    params.insert(name.to_string(), value.into());
    Some(params)
}

/// Cursor of a streamed page; pages whose body was not buffered are the last
fn read_cursor(body: Option<&[u8]>, requested_page: i64) -> PageCursor {
    body.map_or(PageCursor::None, |body| {
        PageCursor::from_json_bytes_at(body, requested_page)
    })
}
