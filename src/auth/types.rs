//! Auth scheme selection
//!
//! `AuthScheme` is the per-resource choice of strategy. It holds no
//! credentials itself; those are read from `Config` each time a strategy is built.

use super::strategies::{
    AuthenticationStrategy, BasicAuth, BearerToken, KeySecretParams, KeySecretQuery, NoAuth,
};
use crate::config::Config;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Factory for strategies defined outside this crate
pub type StrategyBuilder =
    Arc<dyn Fn(&Config) -> Result<Box<dyn AuthenticationStrategy>> + Send + Sync>;

/// Authentication scheme used by a resource
#[derive(Clone, Default)]
pub enum AuthScheme {
    /// No authentication
    None,

    /// `api_key` and `api_secret` added to the request parameters
    #[default]
    KeySecretParams,

    /// `api_key` and `api_secret` appended to the URI query string
    KeySecretQuery,

    /// HTTP Basic with the API key and secret
    Basic,

    /// Bearer token: the configured token, or a JWT minted from the application key
    BearerToken,

    /// Caller-provided strategy factory
    Custom(StrategyBuilder),
}

impl AuthScheme {
    /// Wrap a strategy factory
    pub fn custom<F>(builder: F) -> Self
    where
        F: Fn(&Config) -> Result<Box<dyn AuthenticationStrategy>> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(builder))
    }

    /// Build a fresh strategy for one request
    pub fn strategy(&self, config: &Config) -> Result<Box<dyn AuthenticationStrategy>> {
        Ok(match self {
            AuthScheme::None => Box::new(NoAuth),
            AuthScheme::KeySecretParams => Box::new(KeySecretParams::from_config(config)?),
            AuthScheme::KeySecretQuery => Box::new(KeySecretQuery::from_config(config)?),
            AuthScheme::Basic => Box::new(BasicAuth::from_config(config)?),
            AuthScheme::BearerToken => Box::new(BearerToken::from_config(config)?),
            AuthScheme::Custom(builder) => builder(config)?,
        })
    }
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::None => f.write_str("None"),
            AuthScheme::KeySecretParams => f.write_str("KeySecretParams"),
            AuthScheme::KeySecretQuery => f.write_str("KeySecretQuery"),
            AuthScheme::Basic => f.write_str("Basic"),
            AuthScheme::BearerToken => f.write_str("BearerToken"),
            AuthScheme::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
