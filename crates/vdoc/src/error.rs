//! CLI error types.

use vdoc_build::BuildError;
use vdoc_config::ConfigError;

/// Any failure of a command. Printed once by `main`.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}
