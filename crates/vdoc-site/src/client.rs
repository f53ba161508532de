//! Browser-side hooks of the page shell.
//!
//! The shell loads one script from [`CLIENT_SCRIPT_PATH`]. It binds live
//! search to the input from [`search_box_html`], navigates when the version
//! selector changes, and switches tab panes. Every hook is a data attribute,
//! so pages carry no inline script.

use vdoc_renderer::escape_html;

use crate::route::NavigationState;

/// Script source served at [`CLIENT_SCRIPT_PATH`].
pub const CLIENT_SCRIPT: &str = include_str!("../assets/vdoc.js");

/// Path the shell loads the client script from.
pub const CLIENT_SCRIPT_PATH: &str = "/assets/vdoc.js";

/// Search endpoint queried by the client script.
pub const SEARCH_PATH: &str = "/search";

/// Search input bound to the current version and locale.
#[must_use]
pub fn search_box_html(state: &NavigationState, label: &str) -> String {
    format!(
        "<div id=\"search-box\" class=\"input-box\">\n\
<input type=\"search\" id=\"search-input\" class=\"form-control\" autocomplete=\"off\" aria-label=\"{label}\" placeholder=\"{label}\" data-search-url=\"{SEARCH_PATH}\" data-version=\"{version}\" data-locale=\"{locale}\">\n\
</div>\n",
        label = escape_html(label),
        version = escape_html(&state.version),
        locale = escape_html(&state.locale),
    )
}

/// `<script>` tag loading the client script.
#[must_use]
pub fn client_script_tag() -> String {
    format!("<script src=\"{CLIENT_SCRIPT_PATH}\" defer></script>\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_box_carries_version_and_locale() {
        let state = NavigationState::new("2.0", "tr", "", "a.html", RouteKind::Page);
        assert_eq!(
            search_box_html(&state, "Ara"),
            "<div id=\"search-box\" class=\"input-box\">\n\
<input type=\"search\" id=\"search-input\" class=\"form-control\" autocomplete=\"off\" aria-label=\"Ara\" placeholder=\"Ara\" data-search-url=\"/search\" data-version=\"2.0\" data-locale=\"tr\">\n\
</div>\n"
        );
    }

    #[test]
    fn test_script_binds_every_shell_hook() {
        for hook in [
            "getElementById(\"search-input\")",
            "dataset.searchUrl",
            "select[data-change=\"navigate\"]",
            "button[data-bs-toggle=\"tab\"]",
            "item.baseUrl + \"/\" + item.version + item.file",
        ] {
            assert!(CLIENT_SCRIPT.contains(hook), "{hook}");
        }
    }
}
