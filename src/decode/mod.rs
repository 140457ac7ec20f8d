//! Response decoding module
//!
//! # Overview
//!
//! Turns raw HTTP responses into a `Response` carrying an optional `Entity`,
//! or into an `ApiError` for non-success statuses.
//!
//! - `Entity` - an insertion-ordered JSON object with structural accessors
//! - `ResponseParser` - status/content-type driven parsing of a `RawResponse`

mod entity;
mod parser;

pub use entity::{Entity, EMBEDDED_KEY};
pub use parser::{is_json, RawResponse, Response, ResponseParser};

#[cfg(test)]
mod tests;
