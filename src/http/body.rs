//! Request body encoders
//!
//! Parameters of body-carrying methods are serialized by the resource's
//! `BodyFormat`. The same flattening rules produce query strings.

use crate::error::{Error, Result};
use crate::types::Params;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializes parameters into a request body
pub trait RequestBodyEncoder: Send + Sync {
    /// Write `params` as the body of `request` and set its content type
    fn encode(&self, request: &mut reqwest::Request, params: &Params) -> Result<()>;
}

/// Body format used by a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// `application/x-www-form-urlencoded`
    #[default]
    Form,
    /// `application/json`
    Json,
}

impl BodyFormat {
    /// Encoder for this format
    pub fn encoder(self) -> &'static dyn RequestBodyEncoder {
        match self {
            BodyFormat::Form => &FormEncoder,
            BodyFormat::Json => &JsonEncoder,
        }
    }
}

/// Form-encoded body
#[derive(Debug, Clone, Copy, Default)]
pub struct FormEncoder;

impl RequestBodyEncoder for FormEncoder {
    fn encode(&self, request: &mut reqwest::Request, params: &Params) -> Result<()> {
        request.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        *request.body_mut() = Some(encode_params(params).into());
        Ok(())
    }
}

/// JSON object body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl RequestBodyEncoder for JsonEncoder {
    fn encode(&self, request: &mut reqwest::Request, params: &Params) -> Result<()> {
        let body = serde_json::to_vec(params)
            .map_err(|e| Error::Other(format!("Failed to serialize request body: {e}")))?;
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(body.into());
        Ok(())
    }
}

/// URL-encode parameters as `name=value` pairs
///
/// Arrays repeat the name once per element, `null` values are left out and
/// objects are sent as JSON text.
pub fn encode_params(params: &Params) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter_map(scalar) {
                    serializer.append_pair(name, &item);
                }
            }
            other => {
                if let Some(text) = scalar(other) {
                    serializer.append_pair(name, &text);
                }
            }
        }
    }
    serializer.finish()
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
