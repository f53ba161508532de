//! `vdoc generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use vdoc_build::Builder;
use vdoc_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover vdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inline local images as base64 data URIs.
    #[arg(long)]
    base64_images: bool,

    /// Skip writing the sitemap.
    #[arg(long)]
    no_sitemap: bool,

    /// Log every rendered page.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        output.info(&format!(
            "Source directory: {}",
            config.paths_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output directory: {}",
            config.paths_resolved.html_dir.display()
        ));

        let report = Builder::new(&config).generate()?;

        for warning in &report.warnings {
            output.warning(warning);
        }
        if report.removed > 0 {
            output.info(&format!("Removed {} stale page(s)", report.removed));
        }
        if let Some(sitemap) = &report.sitemap {
            output.info(&format!("Sitemap: {}", sitemap.display()));
        }
        output.success(&format!("Generated {} page(s)", report.pages.len()));
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base64_images: self.base64_images.then_some(true),
            sitemap: self.no_sitemap.then_some(false),
            ..CliSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(base64_images: bool, no_sitemap: bool) -> GenerateArgs {
        GenerateArgs {
            config: None,
            base64_images,
            no_sitemap,
            verbose: false,
        }
    }

    #[test]
    fn test_flags_only_override_when_given() {
        let settings = args(false, false).cli_settings();
        assert_eq!(settings.base64_images, None);
        assert_eq!(settings.sitemap, None);

        let settings = args(true, true).cli_settings();
        assert_eq!(settings.base64_images, Some(true));
        assert_eq!(settings.sitemap, Some(false));
    }
}
