//! Collection key resolution
//!
//! Finds the array that is concatenated across pages. A key declared by the
//! resource wins; otherwise the payload is checked against the closed list of
//! collection names the API uses, and only then does the first field serve as
//! a last resort.

use crate::decode::Entity;
use crate::error::{Error, Result};
use crate::types::JsonObject;
use tracing::{debug, warn};

/// Collection names used by paginated API payloads, in lookup priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCollection {
    Calls,
    Users,
    Legs,
    Data,
    Conversations,
    Applications,
    Records,
    Reports,
    Networks,
    Countries,
    Media,
    Numbers,
    Events,
}

impl KnownCollection {
    /// All known collections in lookup priority
    pub const ALL: [KnownCollection; 13] = [
        KnownCollection::Calls,
        KnownCollection::Users,
        KnownCollection::Legs,
        KnownCollection::Data,
        KnownCollection::Conversations,
        KnownCollection::Applications,
        KnownCollection::Records,
        KnownCollection::Reports,
        KnownCollection::Networks,
        KnownCollection::Countries,
        KnownCollection::Media,
        KnownCollection::Numbers,
        KnownCollection::Events,
    ];

    /// Field name in the payload
    pub fn as_str(self) -> &'static str {
        match self {
            KnownCollection::Calls => "calls",
            KnownCollection::Users => "users",
            KnownCollection::Legs => "legs",
            KnownCollection::Data => "data",
            KnownCollection::Conversations => "conversations",
            KnownCollection::Applications => "applications",
            KnownCollection::Records => "records",
            KnownCollection::Reports => "reports",
            KnownCollection::Networks => "networks",
            KnownCollection::Countries => "countries",
            KnownCollection::Media => "media",
            KnownCollection::Numbers => "numbers",
            KnownCollection::Events => "events",
        }
    }

    /// First known collection present in `scope`
    pub fn find(scope: &JsonObject) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|collection| scope.contains_key(collection.as_str()))
    }
}

/// How a collection key was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Declared by the resource
    Declared(String),
    /// Matched the known collection list
    Known(KnownCollection),
    /// First field of an unrecognised payload
    Fallback(String),
}

impl Resolution {
    /// The resolved field name
    pub fn key(&self) -> &str {
        match self {
            Resolution::Declared(key) | Resolution::Fallback(key) => key,
            Resolution::Known(collection) => collection.as_str(),
        }
    }
}

/// Resolve the collection key within one scope (`_embedded` or the top level)
pub fn resolve_collection(scope: &JsonObject, declared: Option<&str>) -> Option<Resolution> {
    if let Some(key) = declared {
        return Some(Resolution::Declared(key.to_string()));
    }

    KnownCollection::find(scope)
        .map(Resolution::Known)
        .or_else(|| scope.keys().next().cloned().map(Resolution::Fallback))
}

/// Resolves and caches the collection key for one pagination run
#[derive(Debug, Clone, Default)]
pub struct CollectionResolver {
    declared: Option<String>,
    resolved: Option<String>,
}

impl CollectionResolver {
    /// Create a resolver, optionally with a declared key
    pub fn new(declared: Option<String>) -> Self {
        Self {
            declared,
            resolved: None,
        }
    }

    /// Collection key for `entity`, resolved on first use
    pub fn resolve(&mut self, entity: &Entity) -> Result<String> {
        if let Some(key) = &self.resolved {
            return Ok(key.clone());
        }

        let resolution = resolve_collection(entity.collection_scope(), self.declared.as_deref())
            .ok_or_else(|| Error::collection("response has no fields to merge"))?;

        match &resolution {
            Resolution::Fallback(key) => {
                warn!(key = %key, "unrecognised collection, falling back to first field");
            }
            other => debug!(key = other.key(), "resolved collection key"),
        }

        let key = resolution.key().to_string();
        self.resolved = Some(key.clone());
        Ok(key)
    }

    /// Append `page`'s collection to `accumulated`, returning the number of items added
    pub fn merge(&mut self, accumulated: &mut Entity, mut page: Entity) -> Result<usize> {
        let key = self.resolve(accumulated)?;

        let items = page.take_collection(&key).unwrap_or_else(|| {
            debug!(key = %key, "page has no collection, nothing to merge");
            Vec::new()
        });

        let target = accumulated.collection_mut(&key).ok_or_else(|| {
            Error::collection(format!("no array under '{key}' in the first page"))
        })?;

        let added = items.len();
        target.extend(items);
        Ok(added)
    }
}
