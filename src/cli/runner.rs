//! CLI runner - executes commands

use crate::cli::commands::{AuthArg, Cli, Commands, LegsAction};
use crate::config::{Config, ResourceConfig};
use crate::decode::Response;
use crate::error::{Error, Result};
use crate::http::{BodyFormat, Dispatcher, WriterSink};
use crate::resources::Legs;
use crate::types::{ApiRequest, Host};
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = Arc::new(self.load_config()?);

        match &self.cli.command {
            Commands::Request {
                method,
                path,
                params,
                host,
                auth,
                json_body,
                auto_advance,
                collection,
                stream,
            } => {
                let options = RequestOptions {
                    host: *host,
                    auth: *auth,
                    json_body: *json_body,
                    stream: *stream,
                };
                let mut request = ApiRequest::new(*method, path.as_str()).auto_advance(*auto_advance);
                for (name, value) in params {
                    request = request.param(name.as_str(), value.as_str());
                }
                if let Some(key) = collection {
                    request = request.collection_key(key.as_str());
                }
                self.request(config, &request, options).await
            }
            Commands::Legs { action } => self.legs(config, action).await,
        }
    }

    /// Load configuration from the file given with -c, or from the environment
    fn load_config(&self) -> Result<Config> {
        match &self.cli.config {
            Some(path) => Config::from_file(path),
            None => Config::from_env(),
        }
    }

    async fn request(
        &self,
        config: Arc<Config>,
        request: &ApiRequest,
        options: RequestOptions,
    ) -> Result<()> {
        let body = if options.json_body {
            BodyFormat::Json
        } else {
            BodyFormat::Form
        };
        let resource = ResourceConfig::new()
            .host(options.host)
            .auth(options.auth.into())
            .body(body);
        let dispatcher = Dispatcher::new(config, resource)?;

        if options.stream {
            let mut sink = WriterSink::new(std::io::stdout());
            return dispatcher.stream(request, &mut sink).await;
        }

        print_response(&dispatcher.send(request).await?)
    }

    async fn legs(&self, config: Arc<Config>, action: &LegsAction) -> Result<()> {
        let legs = Legs::new(config)?;
        let response = match action {
            LegsAction::List { first_page: true } => legs.list_page().await?,
            LegsAction::List { first_page: false } => legs.list().await?,
            LegsAction::Delete { id } => legs.delete(id).await?,
        };
        print_response(&response)
    }
}

/// Transport options of the `request` command
#[derive(Debug, Clone, Copy)]
struct RequestOptions {
    host: Host,
    auth: AuthArg,
    json_body: bool,
    stream: bool,
}

fn print_response(response: &Response) -> Result<()> {
    match response.entity() {
        Some(entity) => {
            let text = serde_json::to_string_pretty(entity)
                .map_err(|e| Error::Other(format!("Failed to render response: {e}")))?;
            println!("{text}");
        }
        None => println!("{}", response.status()),
    }
    Ok(())
}
