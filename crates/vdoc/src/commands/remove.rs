//! `vdoc remove` command implementation.

use std::path::PathBuf;

use clap::Args;
use vdoc_build::Builder;
use vdoc_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the remove command.
#[derive(Args)]
pub(crate) struct RemoveArgs {
    /// Path to configuration file (default: auto-discover vdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RemoveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let removed = Builder::new(&config).remove()?;
        output.success(&format!(
            "Removed {removed} page(s) from {}",
            config.paths_resolved.html_dir.display()
        ));
        Ok(())
    }
}
