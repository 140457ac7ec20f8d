//! Request dispatcher
//!
//! Provides the single entry point resource wrappers call into:
//! - Signed request construction in a fixed order
//! - Parsed responses, merged across pages when auto-advancing
//! - Raw streaming to a sink
//!
//! One dispatcher serves one resource and reuses its connection pool across
//! sequential calls. Nothing is retried.

use super::body::encode_params;
use super::sink::ResponseSink;
use crate::config::{Config, ResourceConfig};
use crate::decode::{is_json, RawResponse, Response, ResponseParser};
use crate::error::{ApiError, Error, Result};
use crate::pagination::Paginator;
use crate::types::{ApiRequest, Method, Params, StringMap};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Builds, signs and sends requests for one resource
pub struct Dispatcher {
    client: Client,
    config: Arc<Config>,
    resource: ResourceConfig,
    parser: ResponseParser,
}

impl Dispatcher {
    /// Create a dispatcher with its own HTTP client
    pub fn new(config: Arc<Config>, resource: ResourceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config, resource))
    }

    /// Create a dispatcher over an existing HTTP client
    pub fn with_client(client: Client, config: Arc<Config>, resource: ResourceConfig) -> Self {
        Self {
            client,
            config,
            resource,
            parser: ResponseParser::new(),
        }
    }

    /// Client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resource settings
    pub fn resource(&self) -> &ResourceConfig {
        &self.resource
    }

    /// Host this dispatcher talks to
    pub fn host(&self) -> &str {
        self.config.host(self.resource.host)
    }

    /// Send a request and parse the response
    ///
    /// With `auto_advance` every page is fetched and merged into one response.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response> {
        if request.auto_advance {
            return Paginator::new(self).fetch_all(request).await;
        }

        self.fetch(
            &request.path,
            request.params.clone(),
            request.method,
            &request.headers,
        )
        .await
    }

    /// Send a request and stream the raw body to `sink` without parsing
    ///
    /// With `auto_advance` every page is streamed in order.
    pub async fn stream(&self, request: &ApiRequest, sink: &mut dyn ResponseSink) -> Result<()> {
        if request.auto_advance {
            return Paginator::new(self).stream_all(request, sink).await;
        }

        self.stream_page(
            &request.path,
            request.params.clone(),
            request.method,
            &request.headers,
            sink,
            false,
        )
        .await?;
        Ok(())
    }

    /// Build one signed request
    ///
    /// Order: params are signed, then encoded into the query for body-less
    /// methods, then the URI is signed, then the User-Agent, static and
    /// per-call headers are set before the auth headers (so auth can override
    /// them), and finally the body is encoded for body-carrying methods.
    pub fn build_request(
        &self,
        path: &str,
        mut params: Params,
        method: Method,
        headers: &StringMap,
    ) -> Result<reqwest::Request> {
        let mut uri = Url::parse(&format!(
            "{}{}",
            self.config.base_url(self.resource.host),
            path
        ))?;

        let auth = self.resource.auth.strategy(&self.config)?;
        auth.update_params(&mut params)?;

        if !method.has_body() {
            let query = encode_params(&params);
            if !query.is_empty() {
                uri.set_query(Some(&query));
            }
        }

        auth.update_uri(&mut uri)?;

        let mut header_map = HeaderMap::new();
        let user_agent = self.config.user_agent();
        header_map.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|e| Error::invalid_header("User-Agent", e))?,
        );
        for (name, value) in self.resource.headers.iter().chain(headers) {
            insert_header(&mut header_map, name, value)?;
        }

        auth.update_headers(&mut header_map)?;

        let mut request = self
            .client
            .request(method.into(), uri)
            .headers(header_map)
            .build()?;

        if method.has_body() {
            self.resource.body.encoder().encode(&mut request, &params)?;
        }

        Ok(request)
    }

    /// Send one request and parse its response
    pub(crate) async fn fetch(
        &self,
        path: &str,
        params: Params,
        method: Method,
        headers: &StringMap,
    ) -> Result<Response> {
        let response = self.dispatch(path, params, method, headers).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        self.log_response(status);
        if !body.is_empty() {
            debug!(body = %String::from_utf8_lossy(&body), "API response body");
        }

        self.parser.parse(RawResponse::new(status, headers, body))
    }

    /// Send one request and stream its body to `sink`
    ///
    /// When `buffer_body` is set a JSON body is also kept and returned so the
    /// page's cursor fields can be read; the entity itself is never decoded.
    pub(crate) async fn stream_page(
        &self,
        path: &str,
        params: Params,
        method: Method,
        headers: &StringMap,
        sink: &mut dyn ResponseSink,
        buffer_body: bool,
    ) -> Result<Option<Vec<u8>>> {
        let mut response = self.dispatch(path, params, method, headers).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            self.log_response(status);
            return Err(ApiError::from_parts(status.as_u16(), &body).into());
        }

        let buffer_body = buffer_body && is_json(response.headers());
        sink.begin(status, response.headers())?;

        let mut buffer = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if buffer_body {
                buffer.extend_from_slice(&chunk);
            }
            sink.write(&chunk)?;
        }
        sink.finish()?;
        self.log_response(status);

        Ok(buffer_body.then_some(buffer))
    }

    async fn dispatch(
        &self,
        path: &str,
        params: Params,
        method: Method,
        headers: &StringMap,
    ) -> Result<reqwest::Response> {
        let request = self.build_request(path, params, method, headers)?;
        info!(
            method = %method,
            host = self.host(),
            path = request.url().path(),
            "API request"
        );
        Ok(self.client.execute(request).await?)
    }

    fn log_response(&self, status: StatusCode) {
        info!(status = status.as_u16(), host = self.host(), "API response");
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("host", &self.host())
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::invalid_header(name, e))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e))?;
    headers.insert(header_name, header_value);
    Ok(())
}
