//! Search errors.

use std::io;
use std::path::PathBuf;

/// Errors that abort a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
