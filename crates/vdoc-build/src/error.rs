//! Build errors.

use std::io;
use std::path::PathBuf;

use vdoc_renderer::PostProcessError;

/// Error returned by the site builder.
///
/// Every variant names the file it concerns.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to process {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: PostProcessError,
    },

    #[error("Failed to write sitemap {}: {source}", path.display())]
    Sitemap {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
