//! Dynamically-shaped response entity
//!
//! API payloads vary per endpoint, so an entity is an ordered JSON object
//! rather than a fixed schema. Key order follows the payload.

use crate::error::{Error, Result};
use crate::pagination::PageCursor;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Index;

/// Key of the sub-object some APIs nest their collections under
pub const EMBEDDED_KEY: &str = "_embedded";

static NULL: Value = Value::Null;

/// Decoded JSON object returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(JsonObject);

impl Entity {
    /// Create an empty entity
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON body; the top level must be an object
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::decode(format!(
                "Expected a JSON object, found {}",
                json_type(&other)
            ))),
        }
    }

    /// Field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Mutable field by name
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Nested field by dot path, e.g. `_embedded.legs.0.uuid`
    ///
    /// Numeric segments index into arrays.
    pub fn path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Field names in payload order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// First field name in payload order
    pub fn first_key(&self) -> Option<&str> {
        self.keys().next()
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the entity has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `_embedded` sub-object, if present
    pub fn embedded(&self) -> Option<&JsonObject> {
        self.0.get(EMBEDDED_KEY).and_then(Value::as_object)
    }

    /// Object holding paginated collections: `_embedded` when present, else the entity itself
    pub fn collection_scope(&self) -> &JsonObject {
        self.embedded().unwrap_or(&self.0)
    }

    /// Collection array under `key`, looked up in the collection scope
    pub fn collection(&self, key: &str) -> Option<&Vec<Value>> {
        self.collection_scope().get(key).and_then(Value::as_array)
    }

    /// Mutable collection array under `key`, looked up in the collection scope
    pub fn collection_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        if self.embedded().is_some() {
            self.0
                .get_mut(EMBEDDED_KEY)?
                .as_object_mut()?
                .get_mut(key)?
                .as_array_mut()
        } else {
            self.0.get_mut(key)?.as_array_mut()
        }
    }

    /// Move the collection array under `key` out of the entity
    pub fn take_collection(&mut self, key: &str) -> Option<Vec<Value>> {
        self.collection_mut(key).map(std::mem::take)
    }

    /// Pagination cursor carried by the top-level fields
    pub fn cursor(&self) -> PageCursor {
        PageCursor::from_map(&self.0)
    }

    /// Pagination cursor of a page fetched as page number `requested_page`
    pub fn cursor_at(&self, requested_page: i64) -> PageCursor {
        PageCursor::from_map_at(&self.0, requested_page)
    }

    /// Borrow the underlying object
    pub fn as_map(&self) -> &JsonObject {
        &self.0
    }

    /// Take the underlying object
    pub fn into_map(self) -> JsonObject {
        self.0
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<JsonObject> for Entity {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

impl Index<&str> for Entity {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
