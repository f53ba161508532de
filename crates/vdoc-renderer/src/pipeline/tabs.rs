//! Tab group rendering.
//!
//! Expands restored `<tab>` source blocks into a tabbed panel:
//!
//! ```text
//! <tab>
//! <tab-title>macOS|Linux</tab-title>
//! <tab-content>
//! <tab-column>brew install vdoc</tab-column>
//! <tab-column>apt install vdoc</tab-column>
//! </tab-content>
//! </tab>
//! ```
//!
//! Titles pair positionally with columns; the first pair is active.

use std::sync::LazyLock;

use regex::Regex;

use super::balanced;
use crate::markdown::MarkdownRenderer;

const TAB_OPEN: &str = "<tab>";
const TAB_CLOSE: &str = "</tab>";
const CONTENT_OPEN: &str = "<tab-content>";
const CONTENT_CLOSE: &str = "</tab-content>";
const COLUMN_OPEN: &str = "<tab-column>";
const COLUMN_CLOSE: &str = "</tab-column>";

/// Id prefix of top-level groups; nested groups extend their pane's id.
pub(crate) const ROOT_PREFIX: &str = "tabs-";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?si)<tab-title>(.*?)</tab-title>").unwrap());

/// Expand every top-level tab group.
///
/// Group `g` gets pane ids `{prefix}{g}-{i}`. `render_column` turns a
/// column's markdown into finished HTML and receives the id of the pane it
/// fills, so groups nested in that column can be numbered under it.
pub(crate) fn render_tab_groups<F, E>(html: &str, prefix: &str, mut render_column: F) -> Result<String, E>
where
    F: FnMut(&str, &str) -> Result<String, E>,
{
    let mut group = 0;
    balanced::replace(html, TAB_OPEN, TAB_CLOSE, |source| {
        let rendered = render_group(&format!("{prefix}{group}"), source, &mut render_column);
        group += 1;
        rendered
    })
}

fn render_group<F, E>(group: &str, source: &str, render_column: &mut F) -> Result<String, E>
where
    F: FnMut(&str, &str) -> Result<String, E>,
{
    let titles = tab_titles(source);
    let columns = tab_columns(source);

    let mut out = String::from("<div class=\"mb-5\">\n<div class=\"nav nav-tabs\" role=\"tablist\">\n");
    for (i, title) in titles.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let selected = i == 0;
        out.push_str(&format!(
            "<button class=\"nav-link{active}\" id=\"{group}-{i}-tab\" data-bs-toggle=\"tab\" data-bs-target=\"#{group}-{i}\" type=\"button\" role=\"tab\" aria-controls=\"{group}-{i}\" aria-selected=\"{selected}\">{}</button>\n",
            MarkdownRenderer::render_inline(title)
        ));
    }
    out.push_str("</div>\n<div class=\"tab-content\">\n");
    for (i, column) in columns.iter().enumerate() {
        let active = if i == 0 { " show active" } else { "" };
        let pane = format!("{group}-{i}");
        out.push_str(&format!(
            "<div class=\"tab-pane fade{active} p-3\" id=\"{pane}\" role=\"tabpanel\" aria-labelledby=\"{pane}-tab\">\n{}</div>\n",
            render_column(column, &pane)?
        ));
    }
    out.push_str("</div>\n</div>\n");
    Ok(out)
}

/// Pipe-delimited titles ahead of `<tab-content>`; empty when missing.
fn tab_titles(source: &str) -> Vec<String> {
    let head = source.find(CONTENT_OPEN).map_or(source, |at| &source[..at]);
    TITLE_RE
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().split('|').map(|t| t.trim().to_owned()).collect())
        .unwrap_or_default()
}

/// Column bodies; empty when `<tab-content>` is missing.
fn tab_columns(source: &str) -> Vec<String> {
    let Some(content) = balanced::top_level(source, CONTENT_OPEN, CONTENT_CLOSE).first().copied() else {
        return Vec::new();
    };
    balanced::top_level(content.body, COLUMN_OPEN, COLUMN_CLOSE)
        .into_iter()
        .map(|column| dedent(column.body.trim_matches('\n')))
        .collect()
}

/// Strip the indentation shared by every non-blank line.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
