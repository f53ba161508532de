//! HTTP request handlers.

pub(crate) mod assets;
pub(crate) mod pages;
pub(crate) mod search;

use serde::Deserialize;

/// `?l=` locale selector shared by page routes.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LocaleParams {
    pub(crate) l: Option<String>,
}
