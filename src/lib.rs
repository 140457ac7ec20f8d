// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Vonage Client Core
//!
//! The request/response engine shared by every Vonage API resource wrapper.
//!
//! ## Features
//!
//! - **Signed Requests**: API key/secret (params or query), Basic, Bearer/JWT, or custom strategies
//! - **Auto-Advance**: Offset-style and page-style pagination merged into one response
//! - **Typed Errors**: Non-success responses become `ApiError` with the parsed payload
//! - **Streaming**: Raw bodies delivered to a sink instead of parsed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vonage_core::{ApiRequest, AuthScheme, Config, Dispatcher, ResourceConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Arc::new(Config::from_env()?);
//!     let resource = ResourceConfig::new().auth(AuthScheme::BearerToken);
//!     let dispatcher = Dispatcher::new(config, resource)?;
//!
//!     // Fetch every page of legs as one response
//!     let request = ApiRequest::get("/beta/legs").auto_advance(true);
//!     let response = dispatcher.send(&request).await?;
//!     if let Some(entity) = response.entity() {
//!         println!("{}", entity["count"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │        Resource wrappers  (path, method, auto-advance)        │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴───────────────────────────────┐
//! │  Dispatcher: send() → Response     stream() → ResponseSink    │
//! └──────┬──────────────┬──────────────┬──────────────┬───────────┘
//!        │              │              │              │
//! ┌──────┴─────┬────────┴─────┬────────┴──────┬───────┴──────────┐
//! │    Auth    │     Body     │   Paginate    │     Decode       │
//! ├────────────┼──────────────┼───────────────┼──────────────────┤
//! │ Key/Secret │ Form         │ Offset        │ Entity           │
//! │ Basic      │ JSON         │ Page Number   │ ApiError         │
//! │ Bearer/JWT │              │ Collection key│ No-content       │
//! └────────────┴──────────────┴───────────────┴──────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client and resource configuration
pub mod config;

/// Authentication strategies
pub mod auth;

/// Request dispatch, body encoding and streaming
pub mod http;

/// Response parsing and entities
pub mod decode;

/// Auto-advance across pages
pub mod pagination;

/// Resource wrappers
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{AuthScheme, AuthenticationStrategy};
pub use config::{Config, ResourceConfig};
pub use decode::{Entity, Response};
pub use error::{ApiError, Error, Result};
pub use http::{Dispatcher, ResponseSink};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
