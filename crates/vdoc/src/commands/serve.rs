//! `vdoc serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use vdoc_config::{CliSettings, Config};
use vdoc_server::run_server;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover vdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Log every request.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Serving pages from {}",
            config.paths_resolved.html_dir.display()
        ));
        output.info(&format!("Versions: {}", config.versions.available.join(", ")));

        run_server(Arc::new(config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
