//! Breadcrumb trail.

use serde::Serialize;
use vdoc_renderer::{Translate, escape_html};

use crate::menu::Menu;
use crate::route::{NavigationState, RouteKind};
use crate::urls::SiteUrls;

/// One crumb. Crumbs without a URL render as plain text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub url: Option<String>,
    pub active: bool,
}

impl Breadcrumb {
    fn link(label: impl Into<String>, url: String) -> Self {
        Self {
            label: label.into(),
            url: Some(url),
            active: false,
        }
    }

    fn text(label: impl Into<String>, active: bool) -> Self {
        Self {
            label: label.into(),
            url: None,
            active,
        }
    }
}

/// `getting-started` becomes `Getting Started`.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split('-')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Label of the current page: its menu entry label, else the title-cased
/// file stem.
#[must_use]
pub fn page_label(menu: &Menu, state: &NavigationState) -> String {
    menu.find_label(&state.current_path())
        .map_or_else(|| title_case(state.page_stem()), str::to_owned)
}

/// Build the trail for the current page.
///
/// Starts with the translated "Index" crumb and always ends with the page
/// label.
#[must_use]
pub fn breadcrumbs(
    state: &NavigationState,
    menu: &Menu,
    urls: &SiteUrls,
    translator: &dyn Translate,
) -> Vec<Breadcrumb> {
    let label = page_label(menu, state);
    let mut trail = vec![Breadcrumb::link(
        translator.translate("index", &state.locale),
        urls.index_url(&state.version),
    )];

    if state.route == RouteKind::Directory {
        let segments: Vec<&str> = state.directory_segments().collect();
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i + 1 == segments.len();
            let text = title_case(segment);
            if is_last && state.is_index_page() {
                trail.push(Breadcrumb::text(text, false));
            } else {
                let directory = segments[..=i].join("/");
                trail.push(Breadcrumb::link(
                    text,
                    urls.directory_index_url(&state.version, &directory),
                ));
            }
        }
    } else {
        trail.push(Breadcrumb::text(label.clone(), true));
    }

    if trail.last().is_none_or(|last| last.label.trim() != label.trim()) {
        trail.push(Breadcrumb::text(label, true));
    }
    trail
}

/// Render the trail as a Bootstrap breadcrumb list.
#[must_use]
pub fn breadcrumbs_html(trail: &[Breadcrumb]) -> String {
    let mut html = String::from("<nav aria-label=\"breadcrumb\">\n<ol class=\"breadcrumb\">\n");
    for crumb in trail {
        let label = escape_html(&crumb.label);
        match (&crumb.url, crumb.active) {
            (_, true) => html.push_str(&format!(
                "<li class=\"breadcrumb-item active\" aria-current=\"page\">{label}</li>\n"
            )),
            (Some(url), false) => html.push_str(&format!(
                "<li class=\"breadcrumb-item\"><a href=\"{}\">{label}</a></li>\n",
                escape_html(url)
            )),
            (None, false) => html.push_str(&format!("<li class=\"breadcrumb-item\">{label}</li>\n")),
        }
    }
    html.push_str("</ol>\n</nav>\n");
    html
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use pretty_assertions::assert_eq;
    use vdoc_config::SiteConfig;

    fn english(key: &str, _locale: &str) -> String {
        if key == "index" { "Index".to_owned() } else { key.to_owned() }
    }

    fn menu() -> Menu {
        Menu::from_yaml(
            "- url: /a.html\n  label: A\n- url: /b/index.html\n  label: B\n  folder: b\n  children:\n    - url: /b/c.html\n      label: C\n",
            Path::new("navigation.yaml"),
        )
        .unwrap()
    }

    fn urls() -> SiteUrls {
        SiteUrls::new(&SiteConfig::default(), "en", "en")
    }

    fn labels(trail: &[Breadcrumb]) -> Vec<&str> {
        trail.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("getting-started"), "Getting Started");
        assert_eq!(title_case("api"), "Api");
        assert_eq!(title_case("über-uns"), "Über Uns");
    }

    #[test]
    fn test_scenario_trail() {
        let state = NavigationState::new("1.0", "en", "b", "c.html", RouteKind::Directory);
        let trail = breadcrumbs(&state, &menu(), &urls(), &english);
        assert_eq!(labels(&trail), vec!["Index", "B", "C"]);
        assert_eq!(trail[0].url.as_deref(), Some("/1.0/index.html"));
        assert_eq!(trail[1].url.as_deref(), Some("/1.0/b/index.html"));
        assert!(trail[2].active);
    }

    #[test]
    fn test_directory_index_page() {
        let state = NavigationState::new("1.0", "en", "b", "index.html", RouteKind::Directory);
        let trail = breadcrumbs(&state, &menu(), &urls(), &english);
        assert_eq!(labels(&trail), vec!["Index", "B"]);
        assert_eq!(trail[1].url, None);
    }

    #[test]
    fn test_page_route() {
        let state = NavigationState::new("1.0", "en", "", "a.html", RouteKind::Page);
        let trail = breadcrumbs(&state, &menu(), &urls(), &english);
        assert_eq!(labels(&trail), vec!["Index", "A"]);
        assert!(trail[1].active);
    }

    #[test]
    fn test_nested_directories_link_each_level() {
        let state = NavigationState::new("1.0", "en", "guide/deep-dive", "setup.html", RouteKind::Directory);
        let trail = breadcrumbs(&state, &menu(), &urls(), &english);
        assert_eq!(labels(&trail), vec!["Index", "Guide", "Deep Dive", "Setup"]);
        assert_eq!(trail[2].url.as_deref(), Some("/1.0/guide/deep-dive/index.html"));
    }

    #[test]
    fn test_last_crumb_is_always_page_label() {
        for state in [
            NavigationState::new("1.0", "en", "", "index.html", RouteKind::IndexDefault),
            NavigationState::new("1.0", "en", "", "a.html", RouteKind::Page),
            NavigationState::new("1.0", "en", "b", "c.html", RouteKind::Directory),
            NavigationState::new("1.0", "en", "b", "index.html", RouteKind::Directory),
            NavigationState::new("1.0", "en", "x/y", "z.html", RouteKind::Directory),
        ] {
            let trail = breadcrumbs(&state, &menu(), &urls(), &english);
            assert_eq!(trail.last().unwrap().label, page_label(&menu(), &state));
        }
    }

    #[test]
    fn test_breadcrumbs_html() {
        let trail = vec![
            Breadcrumb::link("Index", "/1.0/index.html".to_owned()),
            Breadcrumb::text("Guide", false),
            Breadcrumb::text("Setup", true),
        ];
        assert_eq!(
            breadcrumbs_html(&trail),
            "<nav aria-label=\"breadcrumb\">\n<ol class=\"breadcrumb\">\n\
<li class=\"breadcrumb-item\"><a href=\"/1.0/index.html\">Index</a></li>\n\
<li class=\"breadcrumb-item\">Guide</li>\n\
<li class=\"breadcrumb-item active\" aria-current=\"page\">Setup</li>\n\
</ol>\n</nav>\n"
        );
    }
}
