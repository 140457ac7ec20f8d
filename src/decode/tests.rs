//! Tests for the decode module

use super::*;
use crate::error::{ApiErrorBody, ApiErrorKind, Error};
use crate::pagination::PageCursor;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn raw(status: u16, headers: HeaderMap, body: &str) -> RawResponse {
    RawResponse::new(
        StatusCode::from_u16(status).unwrap(),
        headers,
        body.to_string(),
    )
}

// ============================================================================
// Entity Tests
// ============================================================================

#[test]
fn test_entity_from_slice() {
    let entity = Entity::from_slice(br#"{"uuid": "abc", "count": 2}"#).unwrap();
    assert_eq!(entity.len(), 2);
    assert_eq!(entity["uuid"], "abc");
    assert_eq!(entity.get("count"), Some(&json!(2)));
}

#[test]
fn test_entity_rejects_non_object() {
    let err = Entity::from_slice(b"[1, 2, 3]").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("an array"));
}

#[test]
fn test_entity_rejects_malformed_json() {
    let err = Entity::from_slice(b"{\"legs\": [").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_entity_preserves_field_order() {
    let entity = Entity::from_slice(br#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
    assert_eq!(entity.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(entity.first_key(), Some("zeta"));
}

#[test]
fn test_entity_index_missing_is_null() {
    let entity = Entity::new();
    assert!(entity.is_empty());
    assert_eq!(entity["missing"], Value::Null);
}

#[test]
fn test_entity_path() {
    let entity = Entity::from_slice(
        br#"{"_embedded": {"legs": [{"uuid": "l1"}, {"uuid": "l2"}]}, "links": {"self": {"href": "/x"}}}"#,
    )
    .unwrap();

    assert_eq!(entity.path("_embedded.legs.1.uuid"), Some(&json!("l2")));
    assert_eq!(entity.path("links.self.href"), Some(&json!("/x")));
    assert_eq!(entity.path("_embedded.legs.9"), None);
    assert_eq!(entity.path("links.self.href.deeper"), None);
}

#[test]
fn test_entity_embedded_collection_scope() {
    let mut entity =
        Entity::from_slice(br#"{"count": 2, "_embedded": {"legs": [1, 2]}}"#).unwrap();

    assert!(entity.embedded().is_some());
    assert!(entity.collection_scope().contains_key("legs"));
    assert_eq!(entity.collection("legs"), Some(&vec![json!(1), json!(2)]));

    entity.collection_mut("legs").unwrap().push(json!(3));
    assert_eq!(entity.path("_embedded.legs.2"), Some(&json!(3)));
}

#[test]
fn test_entity_top_level_collection_scope() {
    let mut entity = Entity::from_slice(br#"{"count": 2, "calls": ["a"]}"#).unwrap();

    assert!(entity.embedded().is_none());
    assert!(entity.collection("legs").is_none());
    assert!(entity.collection("count").is_none());

    let taken = entity.take_collection("calls").unwrap();
    assert_eq!(taken, vec![json!("a")]);
    assert_eq!(entity["calls"], json!([]));
}

#[test]
fn test_entity_cursor() {
    let entity =
        Entity::from_slice(br#"{"page": 1, "total_pages": 3, "data": []}"#).unwrap();
    assert_eq!(
        entity.cursor(),
        PageCursor::Page {
            page: 1,
            total_pages: 3
        }
    );
}

#[test]
fn test_entity_serializes_transparently() {
    let mut entity = Entity::new();
    entity.insert("id", "abc");
    assert_eq!(serde_json::to_value(&entity).unwrap(), json!({"id": "abc"}));
    assert_eq!(entity.into_value(), json!({"id": "abc"}));
}

// ============================================================================
// Parser Tests
// ============================================================================

#[test]
fn test_parse_json_success() {
    let response = ResponseParser::new()
        .parse(raw(200, json_headers(), r#"{"uuid": "abc"}"#))
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.has_entity());
    assert_eq!(response.entity().unwrap()["uuid"], "abc");
}

#[test]
fn test_parse_json_with_charset() {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    let response = ResponseParser::new()
        .parse(raw(200, headers, r#"{"ok": true}"#))
        .unwrap();

    assert_eq!(response.entity().unwrap()["ok"], true);
}

#[test]
fn test_parse_no_content() {
    let response = ResponseParser::new()
        .parse(raw(204, json_headers(), "not json at all"))
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.entity().is_none());
}

#[test]
fn test_parse_non_json_success() {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    let response = ResponseParser::new()
        .parse(raw(200, headers, "a,b\n1,2"))
        .unwrap();

    assert!(response.entity().is_none());
}

#[test]
fn test_parse_missing_content_type() {
    let response = ResponseParser::new()
        .parse(raw(200, HeaderMap::new(), r#"{"uuid": "abc"}"#))
        .unwrap();

    assert!(response.entity().is_none());
}

#[test]
fn test_parse_empty_json_body() {
    let response = ResponseParser::new()
        .parse(raw(200, json_headers(), ""))
        .unwrap();

    assert!(response.entity().is_none());
}

#[test]
fn test_parse_malformed_json_is_error() {
    let err = ResponseParser::new()
        .parse(raw(200, json_headers(), "{not json"))
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_parse_client_error() {
    let err = ResponseParser::new()
        .parse(raw(
            404,
            json_headers(),
            r#"{"title": "Not Found", "detail": "No such leg"}"#,
        ))
        .unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.kind, ApiErrorKind::Client);
            assert_eq!(api.json().unwrap()["detail"], "No such leg");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[test]
fn test_parse_server_error_text_body() {
    let err = ResponseParser::new()
        .parse(raw(502, HeaderMap::new(), "Bad Gateway"))
        .unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.kind, ApiErrorKind::Server);
            assert_eq!(api.body, ApiErrorBody::Text("Bad Gateway".to_string()));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[test]
fn test_parse_unauthorized() {
    let err = ResponseParser::new()
        .parse(raw(401, HeaderMap::new(), ""))
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, Error::Api(ref api) if api.kind == ApiErrorKind::Authentication));
}

#[test]
fn test_is_json() {
    assert!(is_json(&json_headers()));
    assert!(!is_json(&HeaderMap::new()));

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("APPLICATION/JSON"));
    assert!(is_json(&headers));

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/problem+json"));
    assert!(!is_json(&headers));
}
