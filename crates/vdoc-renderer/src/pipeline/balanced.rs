//! Nesting-aware matching of open/close tag pairs.
//!
//! Lazy regexes stop at the first close tag, which splits nested blocks in
//! the wrong place. These helpers count depth instead, so every span they
//! hand out starts and ends on the same nesting level.

/// A top-level `open ... close` span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    /// Byte offset of the open tag.
    pub(crate) start: usize,
    /// Byte offset just past the close tag.
    pub(crate) end: usize,
    /// Everything between the tags, nested pairs included.
    pub(crate) body: &'a str,
}

/// Every top-level balanced pair, in document order.
///
/// Scanning stops at the first open tag that is never closed; the remainder
/// is left for the caller to copy through.
pub(crate) fn top_level<'a>(html: &'a str, open: &str, close: &str) -> Vec<Element<'a>> {
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(rel) = html[from..].find(open) {
        let start = from + rel;
        let body_start = start + open.len();
        let Some(body_len) = closing_offset(&html[body_start..], open, close) else {
            break;
        };
        let end = body_start + body_len + close.len();
        found.push(Element {
            start,
            end,
            body: &html[body_start..body_start + body_len],
        });
        from = end;
    }
    found
}

/// Replace each top-level pair with what `rewrite` returns for its body.
pub(crate) fn replace<F, E>(html: &str, open: &str, close: &str, mut rewrite: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut output = String::with_capacity(html.len());
    let mut last = 0;
    for element in top_level(html, open, close) {
        output.push_str(&html[last..element.start]);
        output.push_str(&rewrite(element.body)?);
        last = element.end;
    }
    output.push_str(&html[last..]);
    Ok(output)
}

/// Offset in `body` of the close tag that ends the pair opened just before it.
fn closing_offset(body: &str, open: &str, close: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = 0;
    loop {
        let close_at = pos + body[pos..].find(close)?;
        match body[pos..close_at].find(open) {
            Some(rel) => {
                depth += 1;
                pos += rel + open.len();
            }
            None if depth == 0 => return Some(close_at),
            None => {
                depth -= 1;
                pos = close_at + close.len();
            }
        }
    }
}
