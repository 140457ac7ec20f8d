//! Error types for the Vonage client core
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The main error type for the client core
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("JWT generation failed: {message}")]
    JwtGeneration { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Collection merge failed: {message}")]
    Collection { message: String },

    #[error("Response sink failed: {message}")]
    Sink { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a collection merge error
    pub fn collection(message: impl Into<String>) -> Self {
        Self::Collection {
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// HTTP status carried by an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Check if this error came from a non-success HTTP response
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }
}

// ============================================================================
// API Errors
// ============================================================================

/// Broad class of a non-success HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401 Unauthorized
    Authentication,
    /// Any other 4xx
    Client,
    /// Any 5xx
    Server,
    /// Anything else that is not 2xx (1xx, 3xx)
    Other,
}

impl ApiErrorKind {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// Body of a failed response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorBody {
    /// Body parsed as JSON
    Json(Value),
    /// Body that was not valid JSON
    Text(String),
    /// No body at all
    Empty,
}

/// A non-success HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Status class
    pub kind: ApiErrorKind,
    /// Parsed error payload
    pub body: ApiErrorBody,
}

impl ApiError {
    /// Build an API error from a status code and the raw response body
    pub fn from_parts(status: u16, body: &[u8]) -> Self {
        let body = if body.iter().all(u8::is_ascii_whitespace) {
            ApiErrorBody::Empty
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(value) => ApiErrorBody::Json(value),
                Err(_) => ApiErrorBody::Text(String::from_utf8_lossy(body).into_owned()),
            }
        };

        Self {
            status,
            kind: ApiErrorKind::from_status(status),
            body,
        }
    }

    /// Human-readable message from the error payload, if any
    pub fn detail(&self) -> Option<String> {
        match &self.body {
            ApiErrorBody::Json(Value::Object(map)) => {
                let title = ["title", "error_title", "error-code-label"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_str));
                let detail = ["detail", "error-text", "message", "error"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_str));
                match (title, detail) {
                    (Some(t), Some(d)) => Some(format!("{t}: {d}")),
                    (Some(s), None) | (None, Some(s)) => Some(s.to_string()),
                    (None, None) => None,
                }
            }
            ApiErrorBody::Json(other) => Some(other.to_string()),
            ApiErrorBody::Text(text) => Some(text.clone()),
            ApiErrorBody::Empty => None,
        }
    }

    /// Parsed JSON payload, if the body was JSON
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ApiErrorBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "HTTP {}: {detail}", self.status),
            None => write!(f, "HTTP {}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result type alias for the client core
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
