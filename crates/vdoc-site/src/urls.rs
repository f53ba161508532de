//! Public URLs and on-disk layout.
//!
//! [`SiteUrls`] is the single place where the `{locale}` placeholder of
//! `site.base_url` is substituted. Everything that embeds a URL in generated
//! HTML goes through it.

use std::path::{Path, PathBuf};

use vdoc_config::{PathsConfig, SiteConfig};

use crate::route::NavigationState;

const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Menu file name inside `{menu}/{version}[/{locale}]/`.
pub const MENU_FILE: &str = "navigation.yaml";

/// Locale-resolved base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrls {
    base: String,
}

impl SiteUrls {
    /// Substitute `locale` into the configured base URL.
    ///
    /// With `remove_default_locale` set and `locale` being the default, the
    /// placeholder is removed together with a following `.` or `/`.
    #[must_use]
    pub fn new(site: &SiteConfig, locale: &str, default_locale: &str) -> Self {
        let base_url = if site.remove_default_locale && locale == default_locale {
            site.base_url
                .replace(&format!("{LOCALE_PLACEHOLDER}."), "")
                .replace(&format!("{LOCALE_PLACEHOLDER}/"), "")
                .replace(LOCALE_PLACEHOLDER, "")
        } else {
            site.base_url.replace(LOCALE_PLACEHOLDER, locale)
        };
        Self {
            base: format!("{}{}/", site.http_prefix, base_url.trim_end_matches('/')),
        }
    }

    /// Base URL ending in `/`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}{version}/`
    #[must_use]
    pub fn version_root(&self, version: &str) -> String {
        format!("{}{version}/", self.base)
    }

    /// URL of a menu entry: `{base}{version}{url}`.
    #[must_use]
    pub fn page_url(&self, version: &str, url: &str) -> String {
        format!("{}{version}/{}", self.base, url.trim_start_matches('/'))
    }

    /// Version index page.
    #[must_use]
    pub fn index_url(&self, version: &str) -> String {
        self.page_url(version, "index.html")
    }

    /// Index page of a directory below the version root.
    #[must_use]
    pub fn directory_index_url(&self, version: &str, directory: &str) -> String {
        let directory = directory.trim_matches('/');
        if directory.is_empty() {
            self.index_url(version)
        } else {
            self.page_url(version, &format!("{directory}/index.html"))
        }
    }
}

/// `{html}/{version}/{locale}`
#[must_use]
pub fn html_root(paths: &PathsConfig, version: &str, locale: &str) -> PathBuf {
    paths.html_dir.join(version).join(locale)
}

/// `{source}/{version}/{locale}`
#[must_use]
pub fn source_root(paths: &PathsConfig, version: &str, locale: &str) -> PathBuf {
    paths.source_dir.join(version).join(locale)
}

/// Rendered file of a page: `{html}/{version}/{locale}/[{directory}/]{page}`.
#[must_use]
pub fn rendered_page_path(paths: &PathsConfig, state: &NavigationState) -> PathBuf {
    let mut path = html_root(paths, &state.version, &state.locale);
    for segment in state.directory_segments() {
        path.push(segment);
    }
    path.push(&state.page);
    path
}

/// Menu file for a version, preferring the per-locale file.
#[must_use]
pub fn menu_path(paths: &PathsConfig, version: &str, locale: &str) -> PathBuf {
    let localized = paths.menu_dir.join(version).join(locale).join(MENU_FILE);
    if localized.is_file() {
        localized
    } else {
        paths.menu_dir.join(version).join(MENU_FILE)
    }
}

/// Path relative to `root` with `/` separators.
#[must_use]
pub fn relative_url_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteKind;
    use pretty_assertions::assert_eq;

    fn site(base_url: &str, http_prefix: &str, remove_default_locale: bool) -> SiteConfig {
        SiteConfig {
            base_url: base_url.to_owned(),
            http_prefix: http_prefix.to_owned(),
            remove_default_locale,
        }
    }

    #[test]
    fn test_locale_path_substitution() {
        let urls = SiteUrls::new(&site("docs.example.com/{locale}/", "https://", false), "tr", "en");
        assert_eq!(urls.base(), "https://docs.example.com/tr/");
        assert_eq!(urls.page_url("2.0", "/a.html"), "https://docs.example.com/tr/2.0/a.html");
    }

    #[test]
    fn test_default_locale_removed_from_path() {
        let urls = SiteUrls::new(&site("docs.example.com/{locale}/", "https://", true), "en", "en");
        assert_eq!(urls.base(), "https://docs.example.com/");
    }

    #[test]
    fn test_default_locale_removed_from_subdomain() {
        let urls = SiteUrls::new(&site("{locale}.docs.example.com", "https://", true), "en", "en");
        assert_eq!(urls.base(), "https://docs.example.com/");
        let urls = SiteUrls::new(&site("{locale}.docs.example.com", "https://", true), "tr", "en");
        assert_eq!(urls.base(), "https://tr.docs.example.com/");
    }

    #[test]
    fn test_substitution_happens_once() {
        let urls = SiteUrls::new(&site("/{locale}/", "", false), "en", "en");
        let base = urls.base().to_owned();
        assert_eq!(base, "/en/");
        assert_eq!(urls.version_root("1.0"), "/en/1.0/");
        assert_eq!(urls.directory_index_url("1.0", "guide"), "/en/1.0/guide/index.html");
        assert_eq!(urls.directory_index_url("1.0", ""), "/en/1.0/index.html");
    }

    #[test]
    fn test_rendered_page_path() {
        let paths = PathsConfig {
            html_dir: PathBuf::from("/site/public"),
            ..PathsConfig::default()
        };
        let state = NavigationState::new("1.0", "en", "guide/advanced", "tuning.html", RouteKind::Directory);
        assert_eq!(
            rendered_page_path(&paths, &state),
            PathBuf::from("/site/public/1.0/en/guide/advanced/tuning.html")
        );
    }

    #[test]
    fn test_menu_path_prefers_locale() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig {
            menu_dir: dir.path().to_path_buf(),
            ..PathsConfig::default()
        };
        assert_eq!(menu_path(&paths, "1.0", "tr"), dir.path().join("1.0/navigation.yaml"));

        std::fs::create_dir_all(dir.path().join("1.0/tr")).unwrap();
        std::fs::write(dir.path().join("1.0/tr/navigation.yaml"), "[]").unwrap();
        assert_eq!(menu_path(&paths, "1.0", "tr"), dir.path().join("1.0/tr/navigation.yaml"));
    }

    #[test]
    fn test_relative_url_path() {
        assert_eq!(
            relative_url_path(Path::new("/a"), Path::new("/a/b/c.html")).as_deref(),
            Some("b/c.html")
        );
        assert_eq!(relative_url_path(Path::new("/x"), Path::new("/a/b")), None);
    }
}
