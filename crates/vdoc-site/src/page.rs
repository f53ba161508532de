//! Page assembly.
//!
//! [`Site`] reads a rendered page, inserts heading anchors, and builds every
//! navigation fragment around it. Each fragment is produced by a pure
//! function and composed here; nothing is accumulated across pages.

use std::sync::Arc;

use serde::Serialize;
use vdoc_config::Config;
use vdoc_renderer::{AnchorExtractor, HeadingEntry, escape_html, toc_html};

use crate::breadcrumbs::{Breadcrumb, breadcrumbs, breadcrumbs_html, page_label};
use crate::client::{client_script_tag, search_box_html};
use crate::error::NavigationError;
use crate::menu::{Menu, PageMeta};
use crate::pagination::{PageLink, page_pagination};
use crate::route::NavigationState;
use crate::sidenav::{show_anchors, side_nav_html, sidebar_header_html, version_selector_html};
use crate::urls::{SiteUrls, menu_path, rendered_page_path};

/// HTML fragments of the page shell.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFragments {
    pub search_box: String,
    pub breadcrumbs: String,
    pub sidebar_header: String,
    pub side_nav: String,
    pub version_selector: String,
    pub pagination: String,
}

/// An assembled page.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub title: String,
    pub meta: PageMeta,
    pub state: NavigationState,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Headings shown in the side navigation; empty when gated off.
    pub toc: Vec<HeadingEntry>,
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
    /// Page body wrapped in `<div id="markdown-content">`.
    pub content: String,
    pub fragments: PageFragments,
}

impl Page {
    /// Full HTML document for the page.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut head = format!(
            "<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n",
            escape_html(&self.title)
        );
        for (name, value) in [
            ("description", &self.meta.description),
            ("keywords", &self.meta.keywords),
        ] {
            if let Some(value) = value {
                head.push_str(&format!(
                    "<meta name=\"{name}\" content=\"{}\">\n",
                    escape_html(value)
                ));
            }
        }

        let f = &self.fragments;
        format!(
            "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n{head}</head>\n<body>\n\
<div class=\"container-fluid\">\n<div class=\"row\">\n\
<aside class=\"col-md-3 sidebar\">\n{}{}{}{}</aside>\n\
<main class=\"col-md-9\">\n{}{}{}</main>\n\
</div>\n</div>\n{script}</body>\n</html>\n",
            f.search_box,
            f.version_selector,
            f.sidebar_header,
            f.side_nav,
            f.breadcrumbs,
            self.content,
            f.pagination,
            lang = escape_html(&self.state.locale),
            script = client_script_tag(),
        )
    }
}

/// Navigation model over one configuration.
#[derive(Clone, Debug)]
pub struct Site {
    config: Arc<Config>,
}

impl Site {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locale if configured, else the default locale.
    #[must_use]
    pub fn resolve_locale<'a>(&'a self, locale: Option<&'a str>) -> &'a str {
        match locale {
            Some(l) if self.config.locales.available.iter().any(|a| a == l) => l,
            _ => &self.config.locales.default,
        }
    }

    /// Locale-substituted URLs.
    #[must_use]
    pub fn urls(&self, locale: &str) -> SiteUrls {
        SiteUrls::new(&self.config.site, locale, &self.config.locales.default)
    }

    /// Resolve a request path for a locale.
    #[must_use]
    pub fn resolve(&self, path: &str, locale: &str) -> Option<NavigationState> {
        NavigationState::from_path(path, locale, &self.config.versions)
    }

    /// Load the menu of a version and locale.
    ///
    /// # Errors
    ///
    /// See [`Menu::load`].
    pub fn menu(&self, version: &str, locale: &str) -> Result<Menu, NavigationError> {
        Menu::load(&menu_path(&self.config.paths_resolved, version, locale))
    }

    /// Assemble the page for `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rendered page or the menu is missing or
    /// invalid.
    pub fn page(&self, state: &NavigationState) -> Result<Page, NavigationError> {
        let path = rendered_page_path(&self.config.paths_resolved, state);
        let body = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                NavigationError::PageNotFound(path.clone())
            } else {
                NavigationError::PageRead {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let menu = self.menu(&state.version, &state.locale)?;
        Ok(self.assemble(state, &menu, &body))
    }

    /// Assemble a page from an already loaded menu and rendered body.
    #[must_use]
    pub fn assemble(&self, state: &NavigationState, menu: &Menu, body: &str) -> Page {
        let config = &self.config;
        let translator = &config.translations;
        let urls = self.urls(&state.locale);
        let current = state.current_path();

        let anchored = AnchorExtractor::new(config.anchors.heading_tags()).extract(body);
        let level = menu.current_level(&state.directory);
        let entry_matches = level.iter().any(|entry| entry.matches_path(&current));
        let toc = if show_anchors(state, anchored.headings.len(), entry_matches, &config.anchors) {
            anchored.headings
        } else {
            Vec::new()
        };

        let trail = breadcrumbs(state, menu, &urls, translator);
        let pagination = page_pagination(menu, state);
        let (prev, next) = pagination.links(&urls, &state.version);
        let meta = menu
            .find(&current)
            .and_then(|entry| entry.meta())
            .cloned()
            .unwrap_or_default();
        let title = meta
            .title
            .clone()
            .unwrap_or_else(|| page_label(menu, state));

        let toc_items = toc_html(&toc);
        let fragments = PageFragments {
            search_box: search_box_html(state, &translator.translate("search_title", &state.locale)),
            breadcrumbs: breadcrumbs_html(&trail),
            sidebar_header: sidebar_header_html(state, &urls, translator),
            side_nav: side_nav_html(level, state, &urls, Some(&toc_items)),
            version_selector: version_selector_html(
                &config.versions.available,
                &state.version,
                &urls,
                &translator.translate("version", &state.locale),
            ),
            pagination: pagination.to_html(&urls, state, translator),
        };

        tracing::debug!(
            page = %current,
            version = %state.version,
            locale = %state.locale,
            headings = toc.len(),
            "Assembled page"
        );

        Page {
            title,
            meta,
            state: state.clone(),
            breadcrumbs: trail,
            toc,
            prev,
            next,
            content: format!("<div id=\"markdown-content\">\n{}</div>\n", anchored.html),
            fragments,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::route::RouteKind;
    use pretty_assertions::assert_eq;

    fn site_in(root: &Path) -> Site {
        let mut config = Config::default();
        config.paths_resolved.html_dir = root.join("public");
        config.paths_resolved.menu_dir = root.join("menus");
        Site::new(Arc::new(config))
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("menus/1.0/navigation.yaml"),
            "- url: /a.html\n  label: A\n  meta:\n    title: About A\n    description: All about A\n- url: /b/index.html\n  label: B\n  folder: b\n  children:\n    - url: /b/c.html\n      label: C\n",
        );
        write(
            &dir.path().join("public/1.0/en/a.html"),
            "<h2>Intro</h2>\n<p>Text</p>\n<h3>Usage (advanced)</h3>\n",
        );
        write(&dir.path().join("public/1.0/en/b/c.html"), "<h2>Deep</h2>\n");
        let site = site_in(dir.path());
        (dir, site)
    }

    #[test]
    fn test_assemble_root_page() {
        let (_dir, site) = fixture();
        let state = site.resolve("/1.0/a.html", "en").unwrap();
        let page = site.page(&state).unwrap();

        assert_eq!(page.title, "About A");
        assert_eq!(page.meta.description.as_deref(), Some("All about A"));
        let ids: Vec<_> = page.toc.iter().map(|h| h.anchor_id.as_str()).collect();
        assert_eq!(ids, vec!["0-Intro", "1-Usage"]);
        assert!(page.content.starts_with("<div id=\"markdown-content\">\n<a class=\"anchor\" id=\"0-Intro\""));
        assert!(page.fragments.side_nav.contains("href=\"#1-Usage\""));
        assert_eq!(page.prev, None);
        assert_eq!(page.next.as_ref().map(|l| l.url.as_str()), Some("/1.0/b/index.html"));
    }

    #[test]
    fn test_assemble_directory_page() {
        let (_dir, site) = fixture();
        let state = site.resolve("/1.0/b/c.html", "en").unwrap();
        assert_eq!(state.route, RouteKind::Directory);
        let page = site.page(&state).unwrap();

        let labels: Vec<_> = page.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Index", "B", "C"]);
        assert_eq!(page.title, "C");
        assert_eq!(page.next, None);
        assert!(page.fragments.sidebar_header.contains("Back to Menu"));
        assert!(page.fragments.side_nav.contains("nav-link active"));
        assert_eq!(page.toc.len(), 1);
    }

    #[test]
    fn test_missing_page_and_menu() {
        let (dir, site) = fixture();
        let state = NavigationState::new("1.0", "en", "", "nope.html", RouteKind::Page);
        assert!(matches!(site.page(&state), Err(NavigationError::PageNotFound(_))));

        fs::remove_file(dir.path().join("menus/1.0/navigation.yaml")).unwrap();
        let state = NavigationState::new("1.0", "en", "", "a.html", RouteKind::Page);
        assert!(matches!(site.page(&state), Err(NavigationError::MenuNotFound(_))));
    }

    #[test]
    fn test_to_html_document() {
        let (_dir, site) = fixture();
        let state = site.resolve("/1.0/a.html", "en").unwrap();
        let html = site.page(&state).unwrap().to_html();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>About A</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"All about A\">"));
        assert!(html.contains("id=\"version-combobox\""));
    }

    #[test]
    fn test_to_html_wires_search_and_version_switch() {
        let (_dir, site) = fixture();
        let state = site.resolve("/1.0/a.html", "en").unwrap();
        let html = site.page(&state).unwrap().to_html();
        assert!(html.contains(
            "<aside class=\"col-md-3 sidebar\">\n<div id=\"search-box\" class=\"input-box\">"
        ));
        assert!(html.contains("id=\"search-input\""));
        assert!(html.contains("data-search-url=\"/search\" data-version=\"1.0\" data-locale=\"en\""));
        assert!(html.contains("<select id=\"version-combobox\" class=\"form-select\" data-change=\"navigate\""));
        assert!(html.ends_with("<script src=\"/assets/vdoc.js\" defer></script>\n</body>\n</html>\n"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_resolve_locale() {
        let (_dir, site) = fixture();
        assert_eq!(site.resolve_locale(Some("en")), "en");
        assert_eq!(site.resolve_locale(Some("xx")), "en");
        assert_eq!(site.resolve_locale(None), "en");
    }

    static_assertions::assert_impl_all!(super::Site: Send, Sync);
}
