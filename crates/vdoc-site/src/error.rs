use std::path::PathBuf;

/// Error raised while loading navigation data or assembling a page.
///
/// Every variant is a configuration or file problem that aborts the current
/// page.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Menu file does not exist.
    #[error("Menu file not found: {}", .0.display())]
    MenuNotFound(PathBuf),

    /// Menu file exists but could not be read.
    #[error("Failed to read menu {}: {source}", path.display())]
    MenuRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Menu file is not valid YAML or an entry has the wrong shape.
    #[error("Invalid menu {}: {source}", path.display())]
    MenuParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Menu top level is not a plain list.
    #[error("Menu {} must be a list of entries", .0.display())]
    MenuNotList(PathBuf),

    /// An entry has children but no `folder` key.
    #[error("parent menu of children must contain folder key (entry {url})")]
    MissingFolder { url: String },

    /// Two entries declare the same `folder` key.
    #[error("Duplicate menu folder key: {0}")]
    DuplicateFolder(String),

    /// Rendered page does not exist.
    #[error("Page not found: {}", .0.display())]
    PageNotFound(PathBuf),

    /// Rendered page exists but could not be read.
    #[error("Failed to read page {}: {source}", path.display())]
    PageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NavigationError {
    /// Whether the requested page is absent.
    ///
    /// A configured version without a menu file is a setup problem and does
    /// not count.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PageNotFound(_))
    }
}
