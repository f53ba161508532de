//! Locale-keyed UI strings.
//!
//! Loaded from `[translations.<locale>]` tables. Lookups fall back to the
//! built-in English text for known keys, then to the key itself.

use std::collections::HashMap;

use serde::Deserialize;

/// Per-locale translation tables.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Translations(HashMap<String, HashMap<String, String>>);

impl Translations {
    /// Look up `key` for `locale`.
    #[must_use]
    pub fn translate(&self, key: &str, locale: &str) -> String {
        self.0
            .get(locale)
            .and_then(|table| table.get(key))
            .map_or_else(|| builtin(key).unwrap_or(key).to_owned(), Clone::clone)
    }

    /// Locales with at least one translation entry.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn builtin(key: &str) -> Option<&'static str> {
    let text = match key {
        "note" => "Note",
        "tip" => "Tip",
        "important" => "Important",
        "warning" => "Warning",
        "caution" => "Caution",
        "index" => "Index",
        "back_to_menu" => "Back to Menu",
        "previous" => "Previous",
        "next" => "Next",
        "version" => "Version",
        "search_title" => "Search",
        "search_no_results" => "No results found.",
        "search_results" => "result(s) found.",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Translations {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_translate_locale_entry() {
        let translations = parse(
            r#"
[tr]
note = "Not"
"#,
        );
        assert_eq!(translations.translate("note", "tr"), "Not");
    }

    #[test]
    fn test_translate_falls_back_to_builtin() {
        let translations = parse(
            r#"
[tr]
note = "Not"
"#,
        );
        assert_eq!(translations.translate("warning", "tr"), "Warning");
        assert_eq!(translations.translate("note", "de"), "Note");
    }

    #[test]
    fn test_translate_unknown_key_returns_key() {
        let translations = Translations::default();
        assert_eq!(translations.translate("custom_label", "en"), "custom_label");
    }
}
