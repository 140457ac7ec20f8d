//! CLI module
//!
//! Command-line interface for exercising API endpoints.
//!
//! # Commands
//!
//! - `request` - Send a request to any endpoint
//! - `legs` - List or delete conversation legs

mod commands;
mod runner;

pub use commands::{AuthArg, Cli, Commands, LegsAction};
pub use runner::Runner;
