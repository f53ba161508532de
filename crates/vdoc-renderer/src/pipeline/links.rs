//! Internal link rewriting.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `<a ... href="...">`, capturing the text before the value and the value.
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<a\s[^>]*?href=")([^"]*)""#).unwrap());

/// URL scheme such as `https:` or `mailto:`.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Rewrite every internal `href` to `{base_url}{version}/{target}`.
pub(crate) fn rewrite_links(html: &str, base_url: &str, version: &str) -> String {
    HREF_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let href = &caps[2];
            let resolved = resolve_link(href, base_url, version).unwrap_or_else(|| href.to_owned());
            format!("{}{}\"", &caps[1], resolved)
        })
        .into_owned()
}

/// Resolve an internal link against the version root.
///
/// Returns `None` for links that must be left alone: anything with a scheme,
/// protocol-relative and fragment-only links, empty targets, and links that
/// already start with the base URL. `.md` targets are mapped to `.html`.
#[must_use]
pub fn resolve_link(href: &str, base_url: &str, version: &str) -> Option<String> {
    let href = href.trim();
    let version_root = format!("{base_url}{version}/");
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("//")
        || SCHEME_RE.is_match(href)
        || href.starts_with(&version_root)
        || (base_url.len() > 1 && href.starts_with(base_url))
    {
        return None;
    }

    let split = href.find(['#', '?']).unwrap_or(href.len());
    let (path_part, suffix) = href.split_at(split);
    let normalized = normalize_path(path_part);
    let normalized = match normalized.strip_suffix(".md") {
        Some(stem) => format!("{stem}.html"),
        None => normalized,
    };

    Some(format!("{base_url}{version}/{normalized}{suffix}"))
}

/// Drop `.` and empty segments and apply `..` without escaping the root.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://docs.example.com/";

    #[test]
    fn test_relative_link() {
        assert_eq!(
            resolve_link("guide/install.html", BASE, "2.0").as_deref(),
            Some("https://docs.example.com/2.0/guide/install.html")
        );
    }

    #[test]
    fn test_root_relative_and_dot_segments() {
        assert_eq!(
            resolve_link("/a/./b/../c.html", BASE, "2.0").as_deref(),
            Some("https://docs.example.com/2.0/a/c.html")
        );
    }

    #[test]
    fn test_markdown_target_becomes_html() {
        assert_eq!(
            resolve_link("setup.md#step-2", BASE, "1.0").as_deref(),
            Some("https://docs.example.com/1.0/setup.html#step-2")
        );
    }

    #[test]
    fn test_absolute_links_are_untouched() {
        for href in [
            "https://rust-lang.org",
            "mailto:team@example.com",
            "#intro",
            "//cdn.example.com/x.js",
            "",
            "https://docs.example.com/2.0/a.html",
        ] {
            assert_eq!(resolve_link(href, BASE, "2.0"), None, "{href}");
        }
    }

    #[test]
    fn test_rewrite_links_in_html() {
        let html = r#"<p><a href="a.html">A</a> <a class="x" href="https://x.io">X</a></p>"#;
        assert_eq!(
            rewrite_links(html, "/docs/", "1.0"),
            r#"<p><a href="/docs/1.0/a.html">A</a> <a class="x" href="https://x.io">X</a></p>"#
        );
    }

    #[test]
    fn test_rewrite_links_is_idempotent() {
        let once = rewrite_links(r#"<a href="a.html">A</a>"#, BASE, "1.0");
        assert_eq!(rewrite_links(&once, BASE, "1.0"), once);
    }
}
