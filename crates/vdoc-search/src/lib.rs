//! Keyword search over a rendered page tree.
//!
//! Searches scan every `.html` file of one version and locale line by line.
//! There is no index and no ranking: hits come back in file path order, then
//! line order, then keyword order.
//!
//! ```no_run
//! # fn main() -> Result<(), vdoc_search::SearchError> {
//! use vdoc_search::{DocumentSearch, Query};
//!
//! let search = DocumentSearch::new("public/1.0/en", "/", "1.0");
//! if let Some(query) = Query::parse("install guide", 3, 8) {
//!     for hit in search.search(&query)? {
//!         println!("{}: {}", hit.file, hit.line);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod highlight;
mod response;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

pub use error::SearchError;
pub use highlight::{clean_line, highlight};
pub use response::{SearchData, SearchResponse};

/// Default highlight markup.
pub const HIGHLIGHT_OPEN: &str = r#"<span style="background-color: yellow;">"#;
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// Whitespace-separated keywords, matched independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    keywords: Vec<String>,
}

impl Query {
    /// Parse a raw query.
    ///
    /// Returns `None` when the trimmed query is shorter than `min_len`
    /// characters or splits into more than `max_keywords` terms.
    #[must_use]
    pub fn parse(raw: &str, min_len: usize, max_keywords: usize) -> Option<Self> {
        let raw = raw.trim();
        if raw.chars().count() < min_len {
            return None;
        }
        let keywords: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
        if keywords.is_empty() || keywords.len() > max_keywords {
            return None;
        }
        Some(Self { keywords })
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// One matching line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Locale base URL without a trailing `/`.
    pub base_url: String,
    pub version: String,
    /// Path under the version root with a leading `/`, so a page link is
    /// `{base_url}/{version}{file}`.
    pub file: String,
    /// Tag-free line with highlight markup.
    pub line: String,
}

/// Search over the rendered pages of one version and locale.
#[derive(Clone, Debug)]
pub struct DocumentSearch {
    root: PathBuf,
    base_url: String,
    version: String,
    open: String,
    close: String,
}

impl DocumentSearch {
    /// Create a search over `root` with the default highlight markup.
    ///
    /// A trailing `/` on `base_url` is dropped.
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>, version: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            version: version.into(),
            open: HIGHLIGHT_OPEN.to_owned(),
            close: HIGHLIGHT_CLOSE.to_owned(),
        }
    }

    /// Use custom highlight markup.
    #[must_use]
    pub fn with_highlight(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open = open.into();
        self.close = close.into();
        self
    }

    /// Use the highlight markup of a search configuration.
    #[must_use]
    pub fn with_config(self, config: &vdoc_config::SearchConfig) -> Self {
        self.with_highlight(config.highlight_open.clone(), config.highlight_close.clone())
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::RootNotFound`] if the locale root does not
    /// exist and [`SearchError::NotReadable`] for the first file that cannot
    /// be read. A failing file aborts the whole search.
    pub fn search(&self, query: &Query) -> Result<Vec<SearchHit>, SearchError> {
        if !self.root.is_dir() {
            return Err(SearchError::RootNotFound(self.root.clone()));
        }
        let files = vdoc_site::collect_files(&self.root, "html").map_err(|source| {
            SearchError::NotReadable {
                path: self.root.clone(),
                source,
            }
        })?;

        let per_file = files
            .par_iter()
            .map(|(relative, path)| self.search_file(relative, path, query))
            .collect::<Result<Vec<_>, _>>()?;
        let hits: Vec<SearchHit> = per_file.into_iter().flatten().collect();

        tracing::debug!(
            root = %self.root.display(),
            keywords = query.keywords().len(),
            files = files.len(),
            hits = hits.len(),
            "Search finished"
        );
        Ok(hits)
    }

    fn search_file(
        &self,
        relative: &str,
        path: &Path,
        query: &Query,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let content = fs::read_to_string(path).map_err(|source| SearchError::NotReadable {
            path: path.to_path_buf(),
            source,
        })?;
        let needles: Vec<String> = query.keywords().iter().map(|k| k.to_lowercase()).collect();

        let mut hits = Vec::new();
        for line in content.lines() {
            let lowered = line.to_lowercase();
            for (keyword, needle) in query.keywords().iter().zip(&needles) {
                if !lowered.contains(needle.as_str()) {
                    continue;
                }
                let text = clean_line(line);
                if text.is_empty() {
                    continue;
                }
                hits.push(SearchHit {
                    base_url: self.base_url.clone(),
                    version: self.version.clone(),
                    file: format!("/{relative}"),
                    line: highlight(&text, keyword, &self.open, &self.close),
                });
            }
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn search_in(root: &Path) -> DocumentSearch {
        DocumentSearch::new(root, "/", "1.0").with_highlight("<b>", "</b>")
    }

    #[test]
    fn test_query_parse() {
        assert_eq!(Query::parse("ab", 3, 8), None);
        assert_eq!(Query::parse("  ab  ", 3, 8), None);
        assert_eq!(Query::parse("   ", 0, 8), None);
        let query = Query::parse(" cat  dog ", 3, 8).unwrap();
        assert_eq!(query.keywords(), ["cat", "dog"]);
        assert_eq!(Query::parse("a b c", 3, 2), None);
    }

    #[test]
    fn test_whole_word_highlight_in_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "<p>concatenate the cats</p>\n<p>dogs</p>\n");

        let query = Query::parse("cat", 3, 8).unwrap();
        let hits = search_in(dir.path()).search(&query).unwrap();
        assert_eq!(
            hits,
            vec![SearchHit {
                base_url: String::new(),
                version: "1.0".to_owned(),
                file: "/a.html".to_owned(),
                line: "<b>concatenate</b> the <b>cats</b>".to_owned(),
            }]
        );
    }

    #[test]
    fn test_keywords_are_ored_and_not_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "<p>cat and dog</p>\n<p>only dog</p>\n");

        let query = Query::parse("cat dog", 3, 8).unwrap();
        let hits = search_in(dir.path()).search(&query).unwrap();
        let lines: Vec<_> = hits.iter().map(|h| h.line.as_str()).collect();
        assert_eq!(
            lines,
            vec!["<b>cat</b> and dog", "cat and <b>dog</b>", "only <b>dog</b>"]
        );
    }

    #[test]
    fn test_case_insensitive_and_ordered_by_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "z.html", "<h2>Install</h2>\n");
        write(dir.path(), "guide/b.html", "<p>INSTALL it</p>\n");
        write(dir.path(), "guide/a.html", "<p>reinstall</p>\n");
        write(dir.path(), "notes.md", "install\n");

        let query = Query::parse("install", 3, 8).unwrap();
        let hits = search_in(dir.path()).search(&query).unwrap();
        let files: Vec<_> = hits.iter().map(|h| h.file.as_str()).collect();
        assert_eq!(files, vec!["/guide/a.html", "/guide/b.html", "/z.html"]);
        assert_eq!(hits[0].line, "<b>reinstall</b>");
        assert_eq!(hits[1].line, "<b>INSTALL</b> it");
    }

    #[test]
    fn test_lines_empty_after_stripping_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "<div class=\"catalog\"></div>\n<p>cat</p>\n");

        let query = Query::parse("cat", 3, 8).unwrap();
        let hits = search_in(dir.path()).search(&query).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, "<b>cat</b>");
    }

    #[test]
    fn test_entities_are_decoded_then_escaped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "<p>Use &lt;cat&gt; &amp; more</p>\n");

        let query = Query::parse("cat", 3, 8).unwrap();
        let hits = search_in(dir.path()).search(&query).unwrap();
        assert_eq!(hits[0].line, "Use &lt;<b>cat</b>&gt; &amp; more");
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let query = Query::parse("cat", 3, 8).unwrap();
        let err = search_in(&dir.path().join("missing")).search(&query).unwrap_err();
        assert!(matches!(err, SearchError::RootNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_aborts_search() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "<p>cat</p>\n");
        let locked = dir.path().join("b.html");
        write(dir.path(), "b.html", "<p>cat</p>\n");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_to_string(&locked).is_ok() {
            // Running with privileges that ignore file modes.
            return;
        }

        let query = Query::parse("cat", 3, 8).unwrap();
        let err = search_in(dir.path()).search(&query).unwrap_err();
        assert!(matches!(err, SearchError::NotReadable { ref path, .. } if *path == locked));
    }

    #[test]
    fn test_hit_serializes_camel_case() {
        let hit = SearchHit {
            base_url: "https://docs.example.com/en".to_owned(),
            version: "1.0".to_owned(),
            file: "/a.html".to_owned(),
            line: "x".to_owned(),
        };
        assert_eq!(
            serde_json::to_string(&hit).unwrap(),
            r#"{"baseUrl":"https://docs.example.com/en","version":"1.0","file":"/a.html","line":"x"}"#
        );
    }

    #[test]
    fn test_hit_parts_join_into_page_url() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "guide/a.html", "<p>cat</p>
");

        let query = Query::parse("cat", 3, 8).unwrap();
        let hits = DocumentSearch::new(dir.path(), "https://docs.example.com/en/", "1.0")
            .search(&query)
            .unwrap();
        assert_eq!(hits[0].base_url, "https://docs.example.com/en");
        assert_eq!(hits[0].file, "/guide/a.html");
        assert_eq!(
            format!("{}/{}{}", hits[0].base_url, hits[0].version, hits[0].file),
            "https://docs.example.com/en/1.0/guide/a.html"
        );
    }
}
