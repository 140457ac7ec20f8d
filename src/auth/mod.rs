//! Authentication module
//!
//! Supports: API key/secret (params or query), Basic, Bearer token / JWT, custom strategies
//!
//! A resource selects an `AuthScheme`; the dispatcher asks the scheme for a
//! fresh `AuthenticationStrategy` for every HTTP request and lets it sign the
//! parameters, the URI and the headers, in that order.

mod strategies;
mod types;

pub use strategies::{
    mint_jwt, AuthenticationStrategy, BasicAuth, BearerToken, KeySecretParams, KeySecretQuery,
    NoAuth,
};
pub use types::{AuthScheme, StrategyBuilder};

#[cfg(test)]
mod tests;
