//! Application state.

use vdoc_site::Site;

/// State shared by every handler.
pub struct AppState {
    pub(crate) site: Site,
}

impl AppState {
    #[must_use]
    pub fn new(site: Site) -> Self {
        Self { site }
    }
}
