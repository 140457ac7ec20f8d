//! HTTP dispatch module
//!
//! Builds, signs, sends and parses API requests.
//!
//! # Features
//!
//! - **Signing**: the resource's `AuthScheme` signs params, URI and headers of every request
//! - **Body Encoding**: form or JSON bodies for POST/PUT/PATCH, query strings otherwise
//! - **Auto-Advance**: paginated results merged across pages
//! - **Streaming**: raw bodies delivered to a `ResponseSink` instead of parsed

mod body;
mod client;
mod sink;

pub use body::{encode_params, BodyFormat, FormEncoder, JsonEncoder, RequestBodyEncoder};
pub use client::Dispatcher;
pub use sink::{CallbackSink, ResponseSink, WriterSink};
