//! Common types used throughout the client core
//!
//! This module contains shared type definitions, type aliases,
//! and the request description handed to the dispatcher.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Query/body parameters of one request
pub type Params = BTreeMap<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Whether requests with this method carry their parameters in a body
    pub fn has_body(self) -> bool {
        matches!(self, Method::POST | Method::PUT | Method::PATCH)
    }

    /// Upper-case method name
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            other => Err(Error::config(format!("Unsupported HTTP method: {other}"))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

/// Which configured host a resource talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Host {
    /// The main API host
    #[default]
    Api,
    /// The alternate REST host
    Rest,
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "api" | "api_host" => Ok(Host::Api),
            "rest" | "rest_host" => Ok(Host::Rest),
            other => Err(Error::config(format!("Unknown host: {other}"))),
        }
    }
}

// ============================================================================
// API Request
// ============================================================================

/// One logical API call as issued by a resource wrapper
///
/// The dispatcher never mutates a request; each HTTP exchange (including every
/// continuation page) signs its own copy of `params`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiRequest {
    /// HTTP method of the first request
    pub method: Method,
    /// Route relative to the host, e.g. `/beta/legs`
    pub path: String,
    /// Query or body parameters
    pub params: Params,
    /// Per-call headers
    pub headers: StringMap,
    /// Fetch and merge every page of a paginated result
    pub auto_advance: bool,
    /// Collection key to merge across pages, overriding detection
    pub collection_key: Option<String>,
}

impl ApiRequest {
    /// Create a request with the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH request
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace all parameters
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Enable or disable auto-advance through pages
    #[must_use]
    pub fn auto_advance(mut self, enabled: bool) -> Self {
        self.auto_advance = enabled;
        self
    }

    /// Declare the collection key merged across pages
    #[must_use]
    pub fn collection_key(mut self, key: impl Into<String>) -> Self {
        self.collection_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_has_body() {
        assert!(!Method::GET.has_body());
        assert!(!Method::DELETE.has_body());
        assert!(Method::POST.has_body());
        assert!(Method::PUT.has_body());
        assert!(Method::PATCH.has_body());
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("Delete".parse::<Method>().unwrap(), Method::DELETE);
        assert!("TRACE".parse::<Method>().is_err());
        assert_eq!(Method::PATCH.to_string(), "PATCH");
    }

    #[test]
    fn test_host_from_str() {
        assert_eq!("rest".parse::<Host>().unwrap(), Host::Rest);
        assert_eq!("api_host".parse::<Host>().unwrap(), Host::Api);
        assert!("other".parse::<Host>().is_err());
    }

    #[test]
    fn test_api_request_builder() {
        let request = ApiRequest::post("/v1/calls")
            .param("to", "447700900000")
            .param("record", true)
            .header("X-Request-Id", "abc")
            .auto_advance(true)
            .collection_key("calls");

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/v1/calls");
        assert_eq!(request.params.get("record"), Some(&json!(true)));
        assert_eq!(request.headers.get("X-Request-Id"), Some(&"abc".to_string()));
        assert!(request.auto_advance);
        assert_eq!(request.collection_key.as_deref(), Some("calls"));
    }
}
