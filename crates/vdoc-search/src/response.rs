//! JSON payload of the search endpoint.

use serde::Serialize;
use vdoc_config::Translations;

use crate::SearchHit;

/// `{"data": {...}}`
#[derive(Clone, Debug, Serialize)]
pub struct SearchResponse {
    pub data: SearchData,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub title: String,
    pub result_text: String,
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    /// Wrap hits with translated title and summary text.
    #[must_use]
    pub fn new(results: Vec<SearchHit>, translations: &Translations, locale: &str) -> Self {
        let result_text = if results.is_empty() {
            translations.translate("search_no_results", locale)
        } else {
            format!(
                "{} {}",
                results.len(),
                translations.translate("search_results", locale)
            )
        };
        Self {
            data: SearchData {
                title: translations.translate("search_title", locale),
                result_text,
                results,
            },
        }
    }

    /// The "no results" payload.
    #[must_use]
    pub fn empty(translations: &Translations, locale: &str) -> Self {
        Self::new(Vec::new(), translations, locale)
    }
}
