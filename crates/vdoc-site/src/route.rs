//! Request routes and per-page navigation state.

use serde::Serialize;
use vdoc_config::{LATEST_VERSION, VersionsConfig};

/// File name of a directory's own page.
pub const INDEX_PAGE: &str = "index.html";

/// Kind of the current request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    /// `/`
    IndexDefault,
    /// `/index.html`
    IndexDefaultWithExtension,
    /// `/{version}` or `/{version}/`
    IndexDefaultTrailingSlash,
    /// `/latest`, `/latest/` or `/latest/index.html`
    #[serde(rename = "index-default-latest-alias")]
    IndexDefaultLatest,
    /// `/{version}/{page}.html`
    Page,
    /// `/{version}/{dir}/.../{page}.html`
    Directory,
}

impl RouteKind {
    /// Whether this is one of the version index routes.
    #[must_use]
    pub fn is_index(self) -> bool {
        matches!(
            self,
            Self::IndexDefault
                | Self::IndexDefaultWithExtension
                | Self::IndexDefaultTrailingSlash
                | Self::IndexDefaultLatest
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndexDefault => "index-default",
            Self::IndexDefaultWithExtension => "index-default-with-extension",
            Self::IndexDefaultTrailingSlash => "index-default-trailing-slash",
            Self::IndexDefaultLatest => "index-default-latest-alias",
            Self::Page => "page",
            Self::Directory => "directory",
        }
    }

    /// Route kind of an already split request: directory route when a
    /// directory is present, page route otherwise.
    #[must_use]
    pub fn from_request(directory: &str, page: &str) -> Self {
        if !directory.trim_matches('/').is_empty() {
            Self::Directory
        } else if page.is_empty() {
            Self::IndexDefaultTrailingSlash
        } else {
            Self::Page
        }
    }
}

/// Where the current page sits in the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub version: String,
    pub locale: String,
    /// Directory below the version root, without leading or trailing `/`.
    pub directory: String,
    /// Page file name, e.g. `install.html`.
    pub page: String,
    pub route: RouteKind,
}

impl NavigationState {
    #[must_use]
    pub fn new(version: &str, locale: &str, directory: &str, page: &str, route: RouteKind) -> Self {
        Self {
            version: version.to_owned(),
            locale: locale.to_owned(),
            directory: directory.trim_matches('/').to_owned(),
            page: if page.is_empty() {
                INDEX_PAGE.to_owned()
            } else {
                page.to_owned()
            },
            route,
        }
    }

    /// Resolve a request path.
    ///
    /// Returns `None` for unknown versions and paths escaping the version root.
    #[must_use]
    pub fn from_path(path: &str, locale: &str, versions: &VersionsConfig) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trailing_slash = path.len() > 1 && path.ends_with('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| *s == "." || *s == "..") {
            return None;
        }
        let default = versions.default.as_str();
        let index = |route| Some(Self::new(default, locale, "", INDEX_PAGE, route));

        let Some((&first, rest)) = segments.split_first() else {
            return index(RouteKind::IndexDefault);
        };
        if segments == [INDEX_PAGE] {
            return index(RouteKind::IndexDefaultWithExtension);
        }

        let version = if first == LATEST_VERSION {
            if rest.is_empty() || rest == [INDEX_PAGE] {
                return index(RouteKind::IndexDefaultLatest);
            }
            default
        } else if versions.available.iter().any(|v| v == first) {
            first
        } else {
            return None;
        };

        let Some((&last, dirs)) = rest.split_last() else {
            return Some(Self::new(version, locale, "", INDEX_PAGE, RouteKind::IndexDefaultTrailingSlash));
        };

        let (dirs, page) = if last.ends_with(".html") && !trailing_slash {
            (dirs.join("/"), last.to_owned())
        } else {
            (rest.join("/"), INDEX_PAGE.to_owned())
        };
        let route = RouteKind::from_request(&dirs, &page);
        Some(Self::new(version, locale, &dirs, &page, route))
    }

    /// Request path below the version root, e.g. `/guide/install.html`.
    #[must_use]
    pub fn current_path(&self) -> String {
        if self.directory.is_empty() {
            format!("/{}", self.page)
        } else {
            format!("/{}/{}", self.directory, self.page)
        }
    }

    /// Directory path segments.
    pub fn directory_segments(&self) -> impl Iterator<Item = &str> {
        self.directory.split('/').filter(|s| !s.is_empty())
    }

    /// Whether the page is its directory's own index page.
    #[must_use]
    pub fn is_index_page(&self) -> bool {
        self.page == INDEX_PAGE
    }

    /// File stem of the page (`install` for `install.html`).
    #[must_use]
    pub fn page_stem(&self) -> &str {
        self.page.strip_suffix(".html").unwrap_or(&self.page)
    }
}
