//! Authentication strategy implementations
//!
//! Each strategy signs one request. A strategy may touch the parameters, the
//! URI and the headers; hooks it does not need stay no-ops.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::Params;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use url::Url;

/// Signs one outgoing request
///
/// The dispatcher calls the hooks in a fixed order: `update_params` before the
/// query string is encoded, `update_uri` once the URI is final, and
/// `update_headers` after the client identity and static headers are set.
pub trait AuthenticationStrategy: Send {
    /// Add or rewrite request parameters
    fn update_params(&self, _params: &mut Params) -> Result<()> {
        Ok(())
    }

    /// Rewrite the request URI
    fn update_uri(&self, _uri: &mut Url) -> Result<()> {
        Ok(())
    }

    /// Add or override request headers
    fn update_headers(&self, _headers: &mut HeaderMap) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// No Auth
// ============================================================================

/// Leaves the request untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthenticationStrategy for NoAuth {}

// ============================================================================
// Key/Secret
// ============================================================================

/// Adds `api_key` and `api_secret` to the request parameters
#[derive(Debug, Clone)]
pub struct KeySecretParams {
    api_key: String,
    api_secret: String,
}

impl KeySecretParams {
    /// Read credentials from the config
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api_key: config.require_api_key()?.to_string(),
            api_secret: config.require_api_secret()?.to_string(),
        })
    }
}

impl AuthenticationStrategy for KeySecretParams {
    fn update_params(&self, params: &mut Params) -> Result<()> {
        params.insert("api_key".to_string(), self.api_key.clone().into());
        params.insert("api_secret".to_string(), self.api_secret.clone().into());
        Ok(())
    }
}

/// Appends `api_key` and `api_secret` to the URI query string
#[derive(Debug, Clone)]
pub struct KeySecretQuery {
    api_key: String,
    api_secret: String,
}

impl KeySecretQuery {
    /// Read credentials from the config
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api_key: config.require_api_key()?.to_string(),
            api_secret: config.require_api_secret()?.to_string(),
        })
    }
}

impl AuthenticationStrategy for KeySecretQuery {
    fn update_uri(&self, uri: &mut Url) -> Result<()> {
        uri.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("api_secret", &self.api_secret);
        Ok(())
    }
}

// ============================================================================
// Basic
// ============================================================================

/// HTTP Basic authentication with the API key and secret
#[derive(Debug, Clone)]
pub struct BasicAuth {
    api_key: String,
    api_secret: String,
}

impl BasicAuth {
    /// Read credentials from the config
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            api_key: config.require_api_key()?.to_string(),
            api_secret: config.require_api_secret()?.to_string(),
        })
    }
}

impl AuthenticationStrategy for BasicAuth {
    fn update_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.api_key, self.api_secret));
        headers.insert(AUTHORIZATION, sensitive(&format!("Basic {credentials}"))?);
        Ok(())
    }
}

// ============================================================================
// Bearer Token
// ============================================================================

/// `Authorization: Bearer` with a configured token or a freshly minted JWT
#[derive(Debug, Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Use an explicit token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Use `Config::token`, or mint a JWT from the application credentials
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.token {
            Some(token) => Ok(Self::new(token.clone())),
            None => Ok(Self::new(mint_jwt(config)?)),
        }
    }
}

impl AuthenticationStrategy for BearerToken {
    fn update_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(AUTHORIZATION, sensitive(&format!("Bearer {}", self.token))?);
        Ok(())
    }
}

/// JWT claims for application authentication
#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    application_id: &'a str,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Mint an RS256 JWT for the configured application
pub fn mint_jwt(config: &Config) -> Result<String> {
    let application_id = config
        .application_id
        .as_deref()
        .ok_or_else(|| Error::missing_field("application_id"))?;
    let private_key = config
        .private_key
        .as_deref()
        .ok_or_else(|| Error::missing_field("private_key"))?;

    let now = Utc::now().timestamp();
    #[allow(clippy::cast_possible_wrap)]
    let exp = now + config.token_ttl_secs as i64;

    let claims = JwtClaims {
        application_id,
        iat: now,
        exp,
        jti: uuid::Uuid::new_v4().to_string(),
    };

    let encoding_key =
        EncodingKey::from_rsa_pem(private_key.as_bytes()).map_err(|e| Error::JwtGeneration {
            message: format!("Invalid private key: {e}"),
        })?;

    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key).map_err(|e| {
        Error::JwtGeneration {
            message: format!("Failed to encode JWT: {e}"),
        }
    })
}

/// Header value hidden from Debug output
fn sensitive(value: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|e| Error::invalid_header("Authorization", e))?;
    value.set_sensitive(true);
    Ok(value)
}
