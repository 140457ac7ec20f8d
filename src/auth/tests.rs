//! Tests for the auth module

use super::*;
use crate::config::Config;
use crate::types::Params;
use base64::Engine;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::header::HeaderMap;
use serde_json::{json, Value};
use url::Url;

const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/private.pem");
const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/public.pem");

fn key_secret_config() -> Config {
    Config::builder().api_key("abc").api_secret("xyz").build()
}

fn sign(strategy: &dyn AuthenticationStrategy) -> (Params, Url, HeaderMap) {
    let mut params = Params::new();
    params.insert("page_size".to_string(), json!(10));
    let mut uri = Url::parse("https://api.nexmo.com/beta/legs").unwrap();
    let mut headers = HeaderMap::new();

    strategy.update_params(&mut params).unwrap();
    strategy.update_uri(&mut uri).unwrap();
    strategy.update_headers(&mut headers).unwrap();
    (params, uri, headers)
}

#[test]
fn test_no_auth() {
    let strategy = AuthScheme::None.strategy(&Config::default()).unwrap();
    let (params, uri, headers) = sign(strategy.as_ref());

    assert_eq!(params.len(), 1);
    assert!(uri.query().is_none());
    assert!(headers.is_empty());
}

#[test]
fn test_key_secret_params() {
    let strategy = AuthScheme::KeySecretParams
        .strategy(&key_secret_config())
        .unwrap();
    let (params, uri, headers) = sign(strategy.as_ref());

    assert_eq!(params.get("api_key"), Some(&json!("abc")));
    assert_eq!(params.get("api_secret"), Some(&json!("xyz")));
    assert_eq!(params.get("page_size"), Some(&json!(10)));
    assert!(uri.query().is_none());
    assert!(headers.is_empty());
}

#[test]
fn test_key_secret_query() {
    let strategy = AuthScheme::KeySecretQuery
        .strategy(&key_secret_config())
        .unwrap();
    let (params, uri, _) = sign(strategy.as_ref());

    assert!(!params.contains_key("api_key"));
    assert_eq!(uri.query(), Some("api_key=abc&api_secret=xyz"));
}

#[test]
fn test_key_secret_query_appends_to_existing_query() {
    let strategy = KeySecretQuery::from_config(&key_secret_config()).unwrap();
    let mut uri = Url::parse("https://rest.nexmo.com/search?pattern=1").unwrap();
    strategy.update_uri(&mut uri).unwrap();

    assert_eq!(uri.query(), Some("pattern=1&api_key=abc&api_secret=xyz"));
}

#[test]
fn test_basic_auth() {
    let strategy = AuthScheme::Basic.strategy(&key_secret_config()).unwrap();
    let (_, _, headers) = sign(strategy.as_ref());

    let auth_header = headers.get("Authorization").unwrap().to_str().unwrap();
    assert!(auth_header.starts_with("Basic "));

    let encoded = auth_header.strip_prefix("Basic ").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "abc:xyz");
    assert!(headers.get("Authorization").unwrap().is_sensitive());
}

#[test]
fn test_bearer_configured_token() {
    let config = Config::builder().token("my-bearer-token").build();
    let strategy = AuthScheme::BearerToken.strategy(&config).unwrap();
    let (_, _, headers) = sign(strategy.as_ref());

    assert_eq!(
        headers.get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
}

#[test]
fn test_bearer_minted_jwt() {
    let config = Config::builder()
        .application_id("app-123")
        .private_key(PRIVATE_KEY)
        .build();
    let strategy = AuthScheme::BearerToken.strategy(&config).unwrap();
    let (_, _, headers) = sign(strategy.as_ref());

    let header = headers.get("Authorization").unwrap().to_str().unwrap();
    let token = header.strip_prefix("Bearer ").unwrap();

    let mut validation = Validation::new(Algorithm::RS256);
    validation.required_spec_claims.clear();
    validation.validate_aud = false;
    let data = decode::<Value>(
        token,
        &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
        &validation,
    )
    .unwrap();

    assert_eq!(data.claims["application_id"], "app-123");
    let iat = data.claims["iat"].as_i64().unwrap();
    let exp = data.claims["exp"].as_i64().unwrap();
    assert_eq!(exp - iat, 900);
    assert!(data.claims["jti"].as_str().is_some_and(|s| !s.is_empty()));
}

#[test]
fn test_minted_jwts_are_unique() {
    let config = Config::builder()
        .application_id("app-123")
        .private_key(PRIVATE_KEY)
        .build();

    assert_ne!(mint_jwt(&config).unwrap(), mint_jwt(&config).unwrap());
}

#[test]
fn test_bearer_missing_application_id() {
    let config = Config::builder().private_key(PRIVATE_KEY).build();
    let err = AuthScheme::BearerToken.strategy(&config).err().unwrap();

    assert!(matches!(
        err,
        crate::error::Error::MissingConfigField { ref field } if field == "application_id"
    ));
}

#[test]
fn test_bearer_invalid_private_key() {
    let config = Config::builder()
        .application_id("app-123")
        .private_key("not a key")
        .build();
    let err = mint_jwt(&config).unwrap_err();

    assert!(matches!(err, crate::error::Error::JwtGeneration { .. }));
}

#[test]
fn test_key_secret_missing_secret() {
    let config = Config::builder().api_key("abc").build();
    let err = AuthScheme::KeySecretParams.strategy(&config).err().unwrap();

    assert_eq!(err.to_string(), "Missing required config field: api_secret");
}

#[test]
fn test_custom_strategy() {
    struct Signature;

    impl AuthenticationStrategy for Signature {
        fn update_params(&self, params: &mut Params) -> crate::error::Result<()> {
            params.insert("sig".to_string(), json!("signed"));
            Ok(())
        }
    }

    let scheme = AuthScheme::custom(|_| Ok(Box::new(Signature)));
    let strategy = scheme.strategy(&Config::default()).unwrap();
    let (params, _, _) = sign(strategy.as_ref());

    assert_eq!(params.get("sig"), Some(&json!("signed")));
}
