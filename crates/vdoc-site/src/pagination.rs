//! Previous/next links within the current menu level.

use serde::Serialize;
use vdoc_renderer::{Translate, escape_html};

use crate::menu::{Menu, MenuNode, flatten};
use crate::route::NavigationState;
use crate::urls::SiteUrls;

/// Neighbours of the current page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination<'m> {
    pub prev: Option<&'m MenuNode>,
    pub next: Option<&'m MenuNode>,
}

/// A resolved pagination link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub label: String,
    pub url: String,
}

/// Pages the current page is paginated against.
///
/// Inside a directory this is the current folder's entries with all nested
/// children, in menu order. At the version root it is the top-level entries.
#[must_use]
pub fn siblings<'m>(menu: &'m Menu, state: &NavigationState) -> Vec<&'m MenuNode> {
    if state.directory.is_empty() {
        menu.entries().iter().collect()
    } else {
        flatten(menu.current_level(&state.directory))
    }
}

/// Neighbours of `path` in `entries`; both empty when it is not listed.
#[must_use]
pub fn paginate<'m>(entries: &[&'m MenuNode], path: &str) -> Pagination<'m> {
    let Some(index) = entries.iter().position(|entry| entry.matches_path(path)) else {
        return Pagination::default();
    };
    Pagination {
        prev: index.checked_sub(1).and_then(|i| entries.get(i)).copied(),
        next: entries.get(index + 1).copied(),
    }
}

/// Pagination of the current page.
#[must_use]
pub fn page_pagination<'m>(menu: &'m Menu, state: &NavigationState) -> Pagination<'m> {
    paginate(&siblings(menu, state), &state.current_path())
}

impl Pagination<'_> {
    /// Resolve entries to absolute links.
    #[must_use]
    pub fn links(&self, urls: &SiteUrls, version: &str) -> (Option<PageLink>, Option<PageLink>) {
        let link = |entry: &MenuNode| PageLink {
            label: entry.label().to_owned(),
            url: urls.page_url(version, entry.url()),
        };
        (self.prev.map(link), self.next.map(link))
    }

    /// Render the prev/next bar; empty when there are no neighbours.
    #[must_use]
    pub fn to_html(
        &self,
        urls: &SiteUrls,
        state: &NavigationState,
        translator: &dyn Translate,
    ) -> String {
        let (prev, next) = self.links(urls, &state.version);
        if prev.is_none() && next.is_none() {
            return String::new();
        }
        let mut html = String::from("<nav class=\"pagination-nav d-flex justify-content-between\">\n");
        for (link, key, class) in [(prev, "previous", "page-prev"), (next, "next", "page-next")] {
            match link {
                Some(link) => html.push_str(&format!(
                    "<a class=\"{class}\" href=\"{}\"><small>{}</small><span>{}</span></a>\n",
                    escape_html(&link.url),
                    escape_html(&translator.translate(key, &state.locale)),
                    escape_html(&link.label)
                )),
                None => html.push_str(&format!("<span class=\"{class}\"></span>\n")),
            }
        }
        html.push_str("</nav>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::route::RouteKind;
    use pretty_assertions::assert_eq;
    use vdoc_config::SiteConfig;

    fn menu() -> Menu {
        Menu::from_yaml(
            r"
- url: /a.html
  label: A
- url: /b/index.html
  label: B
  folder: b
  children:
    - url: /b/c.html
      label: C
    - url: /b/d/index.html
      label: D
      folder: d
      children:
        - url: /b/d/e.html
          label: E
- url: /f.html
  label: F
",
            Path::new("navigation.yaml"),
        )
        .unwrap()
    }

    fn labels(p: Pagination<'_>) -> (Option<&str>, Option<&str>) {
        (p.prev.map(MenuNode::label), p.next.map(MenuNode::label))
    }

    #[test]
    fn test_bounds_for_every_index() {
        let menu = menu();
        let entries: Vec<&MenuNode> = menu.entries().iter().collect();
        let n = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            let p = paginate(&entries, entry.url());
            assert_eq!(p.prev.map(MenuNode::url), i.checked_sub(1).map(|j| entries[j].url()));
            assert_eq!(p.next.map(MenuNode::url), (i + 1 < n).then(|| entries[i + 1].url()));
        }
    }

    #[test]
    fn test_root_page_uses_top_level() {
        let menu = menu();
        let state = NavigationState::new("1.0", "en", "", "a.html", RouteKind::Page);
        assert_eq!(labels(page_pagination(&menu, &state)), (None, Some("B")));
    }

    #[test]
    fn test_last_child_has_no_next() {
        let menu = menu();
        let state = NavigationState::new("1.0", "en", "b/d", "e.html", RouteKind::Directory);
        assert_eq!(labels(page_pagination(&menu, &state)), (Some("D"), None));
    }

    #[test]
    fn test_first_child_in_folder() {
        let menu = menu();
        let state = NavigationState::new("1.0", "en", "b", "c.html", RouteKind::Directory);
        assert_eq!(labels(page_pagination(&menu, &state)), (None, Some("D")));
    }

    #[test]
    fn test_unlisted_page_has_no_neighbours() {
        let menu = menu();
        let state = NavigationState::new("1.0", "en", "", "zzz.html", RouteKind::Page);
        assert_eq!(page_pagination(&menu, &state), Pagination::default());
    }

    #[test]
    fn test_to_html() {
        let menu = menu();
        let state = NavigationState::new("1.0", "en", "", "a.html", RouteKind::Page);
        let urls = SiteUrls::new(&SiteConfig::default(), "en", "en");
        let t = |key: &str, _: &str| key.to_uppercase();
        let html = page_pagination(&menu, &state).to_html(&urls, &state, &t);
        assert_eq!(
            html,
            "<nav class=\"pagination-nav d-flex justify-content-between\">\n\
<span class=\"page-prev\"></span>\n\
<a class=\"page-next\" href=\"/1.0/b/index.html\"><small>NEXT</small><span>B</span></a>\n\
</nav>\n"
        );
    }
}
