//! Block-level rewrites: escapes, tables, blockquotes and alerts.

use std::convert::Infallible;
use std::sync::LazyLock;

use regex::Regex;

use super::{AlertKind, Translate, balanced};
use crate::state::escape_html;

const TABLE_WRAP_OPEN: &str = "<div class=\"table-responsive\">\n";
const TABLE_WRAP_CLOSE: &str = "\n</div>";

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<table\b.*?</table>").unwrap());

const QUOTE_OPEN: &str = "<blockquote>";
const QUOTE_CLOSE: &str = "</blockquote>";

/// One pattern per [`AlertKind`], indexed by [`AlertKind::index`], matched
/// against a whole blockquote body.
static ALERT_RES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    AlertKind::ALL.map(|kind| {
        Regex::new(&format!(r"(?s)\A\s*<p>(?i:\[!{}\])(.*)\z", kind.marker())).unwrap()
    })
});

/// Turn literal `` \` `` sequences into plain backticks.
pub(crate) fn unescape_backticks(html: &str) -> String {
    html.replace("\\`", "`")
}

/// Wrap every `<table>` in a responsive container, skipping tables already wrapped.
pub(crate) fn wrap_tables(html: &str) -> String {
    let mut output = String::with_capacity(html.len() + 64);
    let mut last = 0;
    for m in TABLE_RE.find_iter(html) {
        output.push_str(&html[last..m.start()]);
        if html[..m.start()].ends_with(TABLE_WRAP_OPEN) {
            output.push_str(m.as_str());
        } else {
            output.push_str(TABLE_WRAP_OPEN);
            output.push_str(m.as_str());
            output.push_str(TABLE_WRAP_CLOSE);
        }
        last = m.end();
    }
    output.push_str(&html[last..]);
    output
}

/// Style remaining plain blockquotes as a neutral callout.
pub(crate) fn style_blockquotes(html: &str) -> String {
    map_blockquotes(html, &mut |body: &str| {
        let body = body.strip_prefix('\n').unwrap_or(body);
        Some(format!("<div class=\"alert alert-secondary\" role=\"alert\">\n{body}</div>"))
    })
}

/// Replace blockquotes starting with the kind's `[!MARKER]` by a titled callout.
pub(crate) fn rewrite_alert(
    html: &str,
    kind: AlertKind,
    translator: &dyn Translate,
    locale: &str,
) -> String {
    let title = escape_html(&translator.translate(kind.translation_key(), locale));
    let pattern = &ALERT_RES[kind.index()];
    map_blockquotes(html, &mut |body: &str| {
        let rest = pattern.captures(body)?.get(1)?.as_str().trim_start();
        let content = match rest.strip_prefix("</p>") {
            Some(after) => after.trim_start().to_owned(),
            None => format!("<p>{rest}"),
        };
        Some(format!(
            "<div class=\"alert alert-{class}\" role=\"alert\">\n<div class=\"alert-title\">{icon}{title}</div>\n<div class=\"alert-content\">\n{content}</div>\n</div>",
            class = kind.css_class(),
            icon = kind.icon(),
        ))
    })
}

/// Rewrite balanced blockquotes innermost first.
///
/// `rewrite` sees each body with its nested quotes already handled and
/// returns `None` to keep the quote as it is.
fn map_blockquotes(html: &str, rewrite: &mut dyn FnMut(&str) -> Option<String>) -> String {
    let Ok(output) = balanced::replace(html, QUOTE_OPEN, QUOTE_CLOSE, |body| {
        let body = map_blockquotes(body, &mut *rewrite);
        Ok::<_, Infallible>(
            rewrite(&body).unwrap_or_else(|| format!("{QUOTE_OPEN}{body}{QUOTE_CLOSE}")),
        )
    });
    output
}
