//! Conversation legs

use super::path_segment;
use crate::auth::AuthScheme;
use crate::config::{Config, ResourceConfig};
use crate::decode::Response;
use crate::error::Result;
use crate::http::{Dispatcher, ResponseSink};
use crate::pagination::KnownCollection;
use crate::types::ApiRequest;
use std::sync::Arc;

const LEGS_PATH: &str = "/beta/legs";

/// Legs of voice conversations
#[derive(Debug)]
pub struct Legs {
    dispatcher: Dispatcher,
}

impl Legs {
    /// Create the wrapper; legs use bearer authentication on the API host
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let resource = ResourceConfig::new().auth(AuthScheme::BearerToken);
        Ok(Self {
            dispatcher: Dispatcher::new(config, resource)?,
        })
    }

    /// Wrap an existing dispatcher
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    fn list_request() -> ApiRequest {
        ApiRequest::get(LEGS_PATH).collection_key(KnownCollection::Legs.as_str())
    }

    /// List all legs, following every page
    pub async fn list(&self) -> Result<Response> {
        self.dispatcher
            .send(&Self::list_request().auto_advance(true))
            .await
    }

    /// Fetch only the first page of legs
    pub async fn list_page(&self) -> Result<Response> {
        self.dispatcher.send(&Self::list_request()).await
    }

    /// Stream every page of legs to `sink`
    pub async fn list_stream(&self, sink: &mut dyn ResponseSink) -> Result<()> {
        self.dispatcher
            .stream(&Self::list_request().auto_advance(true), sink)
            .await
    }

    /// Delete a leg
    pub async fn delete(&self, leg_id: &str) -> Result<Response> {
        let path = format!("{LEGS_PATH}/{}", path_segment(leg_id));
        self.dispatcher.send(&ApiRequest::delete(path)).await
    }
}
