//! CLI commands and argument parsing

use crate::auth::AuthScheme;
use crate::types::{Host, Method};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vonage API client CLI
#[derive(Parser, Debug)]
#[command(name = "vonage-core")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); `VONAGE_*` environment variables are used when absent
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a request to any endpoint
    Request {
        /// HTTP method
        method: Method,

        /// Path relative to the host, e.g. /beta/legs
        path: String,

        /// Parameter as name=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Host to send to (api or rest)
        #[arg(long, default_value = "api")]
        host: Host,

        /// Authentication scheme
        #[arg(long, value_enum, default_value = "key-secret-params")]
        auth: AuthArg,

        /// Encode body parameters as JSON instead of a form
        #[arg(long)]
        json_body: bool,

        /// Follow and merge every page
        #[arg(long)]
        auto_advance: bool,

        /// Collection key merged across pages
        #[arg(long)]
        collection: Option<String>,

        /// Write raw response bodies to stdout instead of parsing them
        #[arg(long)]
        stream: bool,
    },

    /// Conversation legs
    Legs {
        #[command(subcommand)]
        action: LegsAction,
    },
}

/// Actions on conversation legs
#[derive(Subcommand, Debug)]
pub enum LegsAction {
    /// List legs
    List {
        /// Only fetch the first page
        #[arg(long)]
        first_page: bool,
    },

    /// Delete a leg
    Delete {
        /// Leg id
        id: String,
    },
}

/// Authentication scheme selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AuthArg {
    /// No authentication
    None,
    /// api_key/api_secret parameters
    KeySecretParams,
    /// api_key/api_secret in the query string
    KeySecretQuery,
    /// HTTP Basic
    Basic,
    /// Bearer token or minted JWT
    Bearer,
}

impl From<AuthArg> for AuthScheme {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::None => AuthScheme::None,
            AuthArg::KeySecretParams => AuthScheme::KeySecretParams,
            AuthArg::KeySecretQuery => AuthScheme::KeySecretQuery,
            AuthArg::Basic => AuthScheme::Basic,
            AuthArg::Bearer => AuthScheme::BearerToken,
        }
    }
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{s}'"))
}
