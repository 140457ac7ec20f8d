//! Response parser
//!
//! Maps a raw HTTP response to a `Response` or an `ApiError`.

use super::entity::Entity;
use crate::error::{ApiError, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;

/// Parsed API response
///
/// Owns its entity; no-content and non-JSON responses carry none.
#[derive(Debug, Clone)]
pub struct Response {
    entity: Option<Entity>,
    status: StatusCode,
    headers: HeaderMap,
}

impl Response {
    /// Create a response
    pub fn new(entity: Option<Entity>, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            entity,
            status,
            headers,
        }
    }

    /// Decoded entity, if any
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Mutable decoded entity, if any
    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        self.entity.as_mut()
    }

    /// Take the decoded entity
    pub fn into_entity(self) -> Option<Entity> {
        self.entity
    }

    /// HTTP status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// HTTP headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether an entity was decoded
    pub fn has_entity(&self) -> bool {
        self.entity.is_some()
    }
}

/// Undecoded HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// HTTP headers
    pub headers: HeaderMap,
    /// Full response body
    pub body: Bytes,
}

impl RawResponse {
    /// Create a raw response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

/// Converts raw responses into entities or errors
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// Create a parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw response
    ///
    /// Non-success statuses fail with `ApiError`. No-content statuses, non-JSON
    /// content types and empty bodies yield a response without an entity. A
    /// JSON body that does not parse fails with a decode error.
    pub fn parse(&self, raw: RawResponse) -> Result<Response> {
        let RawResponse {
            status,
            headers,
            body,
        } = raw;

        if !status.is_success() {
            return Err(ApiError::from_parts(status.as_u16(), &body).into());
        }

        let no_content = matches!(status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT);
        if no_content || !is_json(&headers) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Response::new(None, status, headers));
        }

        let entity = Entity::from_slice(&body)?;
        Ok(Response::new(Some(entity), status, headers))
    }
}

/// Whether the `Content-Type` header declares `application/json`
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
