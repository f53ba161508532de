//! Heading anchors and table of contents.
//!
//! Parses a page body as an HTML fragment, finds the headings that sit
//! directly under the fragment root, and inserts an empty anchor target in
//! front of each one. Headings nested in other elements (blockquotes, tab
//! panes, list items) are left alone.

use std::sync::LazyLock;

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use regex::Regex;
use serde::Serialize;

use crate::pipeline::links::rewrite_links;
use crate::state::escape_html;

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\(.*\)|\(.*\)").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A heading found on a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingEntry {
    /// Heading level (2 for `<h2>`).
    pub level: u8,
    /// Visible heading text.
    pub text: String,
    /// Id of the anchor inserted before the heading.
    pub anchor_id: String,
}

/// Page HTML with anchors inserted, plus the headings in document order.
#[derive(Clone, Debug)]
pub struct AnchorResult {
    pub html: String,
    pub headings: Vec<HeadingEntry>,
}

/// Inserts heading anchors into rendered pages.
#[derive(Clone, Debug)]
pub struct AnchorExtractor {
    tags: Vec<String>,
    link_base: Option<(String, String)>,
}

impl AnchorExtractor {
    /// Extractor matching the given heading tag names (`h2`, `h3`, ...).
    #[must_use]
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags: tags.into_iter().map(|t| t.trim().to_ascii_lowercase()).collect(),
            link_base: None,
        }
    }

    /// Also rewrite internal links against `{base_url}{version}/`.
    ///
    /// Only needed when the HTML has not been through the post-processing
    /// pipeline.
    #[must_use]
    pub fn with_link_base(mut self, base_url: &str, version: &str) -> Self {
        self.link_base = Some((base_url.to_owned(), version.to_owned()));
        self
    }

    /// Insert anchors and collect headings.
    ///
    /// When no heading matches, the HTML is returned unchanged.
    #[must_use]
    pub fn extract(&self, html: &str) -> AnchorResult {
        let html = match &self.link_base {
            Some((base_url, version)) => rewrite_links(html, base_url, version),
            None => html.to_owned(),
        };

        let Some(root) = fragment_root(&html) else {
            return AnchorResult {
                html,
                headings: Vec::new(),
            };
        };

        let mut output = String::with_capacity(html.len() + 256);
        let mut headings = Vec::new();
        let mut index = 0;
        for child in root.children.borrow().iter() {
            if let Some(level) = self.heading_level(child) {
                let text = text_content(child).trim().to_owned();
                if !text.is_empty() {
                    let anchor_id = format!("{index}-{}", anchor_name(&text));
                    let id = escape_html(&anchor_id);
                    output.push_str(&format!("<a class=\"anchor\" id=\"{id}\" name=\"{id}\"></a>"));
                    headings.push(HeadingEntry {
                        level,
                        text,
                        anchor_id,
                    });
                }
                index += 1;
            }
            output.push_str(&serialize_node(child));
        }

        if headings.is_empty() {
            return AnchorResult { html, headings };
        }
        tracing::debug!(count = headings.len(), "Inserted heading anchors");
        AnchorResult {
            html: output,
            headings,
        }
    }

    fn heading_level(&self, handle: &Handle) -> Option<u8> {
        let NodeData::Element { name, .. } = &handle.data else {
            return None;
        };
        let tag = name.local.as_ref();
        if !self.tags.iter().any(|t| t == tag) {
            return None;
        }
        tag.strip_prefix('h')?.parse().ok()
    }
}

/// Anchor name for a heading text: parenthetical suffixes removed and
/// whitespace runs turned into `-`.
///
/// `"setAlias()"` becomes `"setAlias"`, `"Install (Linux)"` becomes `"Install"`.
#[must_use]
pub fn anchor_name(text: &str) -> String {
    let stripped = PARENTHETICAL_RE.replace_all(text, "");
    WHITESPACE_RE.replace_all(stripped.trim(), "-").into_owned()
}

/// Render headings as the side navigation sub-list items.
#[must_use]
pub fn toc_html(headings: &[HeadingEntry]) -> String {
    headings
        .iter()
        .map(|h| {
            format!(
                "<li class=\"nav-sub-item nav-sub-item-h{}\"><a href=\"#{}\" class=\"nav-sub-link\">{}</a></li>\n",
                h.level,
                escape_html(&h.anchor_id),
                escape_html(&h.text)
            )
        })
        .collect()
}

/// Parse `html` as `<body>` content and return the element holding the nodes.
fn fragment_root(html: &str) -> Option<Handle> {
    let context = QualName::new(None, ns!(html), "body".into());
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![], false)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .ok()?;
    let document = dom.document.children.borrow();
    document
        .iter()
        .find(|node| matches!(node.data, NodeData::Element { .. }))
        .cloned()
}

fn serialize_node(handle: &Handle) -> String {
    let mut bytes = Vec::new();
    let serializable: SerializableHandle = handle.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    if serialize(&mut bytes, &serializable, opts).is_err() {
        return String::new();
    }
    String::from_utf8(bytes).unwrap_or_default()
}

fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    text
}

fn collect_text(handle: &Handle, text: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } => {
            for child in handle.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> AnchorExtractor {
        AnchorExtractor::new(vec!["h2".to_owned(), "h3".to_owned()])
    }

    #[test]
    fn test_anchor_name() {
        assert_eq!(anchor_name("setAlias()"), "setAlias");
        assert_eq!(anchor_name("Install (Linux)"), "Install");
        assert_eq!(anchor_name("Getting  started now"), "Getting-started-now");
    }

    #[test]
    fn test_inserts_anchor_before_heading() {
        let result = extractor().extract("<h2>Install</h2>\n<p>Run it.</p>\n");
        assert_eq!(
            result.html,
            "<a class=\"anchor\" id=\"0-Install\" name=\"0-Install\"></a><h2>Install</h2>\n<p>Run it.</p>\n"
        );
        assert_eq!(
            result.headings,
            vec![HeadingEntry {
                level: 2,
                text: "Install".to_owned(),
                anchor_id: "0-Install".to_owned(),
            }]
        );
    }

    #[test]
    fn test_duplicate_headings_get_distinct_ids() {
        let result = extractor().extract("<h2>Overview</h2>\n<h3>Overview</h3>\n");
        let ids: Vec<_> = result.headings.iter().map(|h| h.anchor_id.as_str()).collect();
        assert_eq!(ids, vec!["0-Overview", "1-Overview"]);
    }

    #[test]
    fn test_nested_headings_are_ignored() {
        let html = "<div class=\"alert\">\n<h2>Inside</h2>\n</div>\n<h2>Outside</h2>\n";
        let result = extractor().extract(html);
        assert_eq!(result.headings.len(), 1);
        assert_eq!(result.headings[0].anchor_id, "0-Outside");
    }

    #[test]
    fn test_unmatched_levels_and_empty_text() {
        let result = extractor().extract("<h4>Deep</h4>\n<h2> </h2>\n<h2>Real</h2>\n");
        assert_eq!(result.headings.len(), 1);
        assert_eq!(result.headings[0].anchor_id, "1-Real");
        assert!(!result.html.contains("id=\"0-"));
    }

    #[test]
    fn test_no_headings_returns_input() {
        let html = "<p>Just <img src=\"a.png\" class=\"img-fluid\" /> text</p>\n";
        let result = extractor().extract(html);
        assert_eq!(result.html, html);
        assert!(result.headings.is_empty());
    }

    #[test]
    fn test_heading_text_includes_inline_markup() {
        let result = extractor().extract("<h2><code>run()</code> options</h2>\n");
        assert_eq!(result.headings[0].text, "run() options");
        assert_eq!(result.headings[0].anchor_id, "0-run-options");
    }

    #[test]
    fn test_standalone_link_resolution() {
        let result = extractor()
            .with_link_base("/docs/", "1.0")
            .extract("<h2>A</h2>\n<p><a href=\"b.html\">b</a></p>\n");
        assert!(result.html.contains("href=\"/docs/1.0/b.html\""));
    }

    #[test]
    fn test_toc_html() {
        let headings = vec![HeadingEntry {
            level: 3,
            text: "A & B".to_owned(),
            anchor_id: "0-A-&-B".to_owned(),
        }];
        assert_eq!(
            toc_html(&headings),
            "<li class=\"nav-sub-item nav-sub-item-h3\"><a href=\"#0-A-&amp;-B\" class=\"nav-sub-link\">A &amp; B</a></li>\n"
        );
    }
}
