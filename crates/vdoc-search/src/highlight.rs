//! Line cleanup and keyword highlighting.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Strip tags, decode entities and drop line breaks.
#[must_use]
pub fn clean_line(line: &str) -> String {
    let stripped = TAG_RE.replace_all(line, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded.replace(['\r', '\n'], "").trim().to_owned()
}

/// Wrap every occurrence of `keyword` in `text`, widened to the letter run
/// it sits in, with `open`/`close`.
///
/// `text` is plain text; everything outside the markup is HTML-escaped.
#[must_use]
pub fn highlight(text: &str, keyword: &str, open: &str, close: &str) -> String {
    let Ok(re) = Regex::new(&format!(r"(?i)\p{{L}}*?{}\p{{L}}*", regex::escape(keyword))) else {
        return html_escape::encode_text(text).into_owned();
    };

    let mut out = String::with_capacity(text.len() + open.len() + close.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[last..m.start()]));
        out.push_str(open);
        out.push_str(&html_escape::encode_text(m.as_str()));
        out.push_str(close);
        last = m.end();
    }
    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_highlight_extends_to_whole_words() {
        assert_eq!(
            highlight("concatenate the cats", "cat", "[", "]"),
            "[concatenate] the [cats]"
        );
    }

    #[test]
    fn test_highlight_unicode_letters() {
        assert_eq!(highlight("Größenänderung", "änder", "[", "]"), "[Größenänderung]");
    }

    #[test]
    fn test_highlight_keyword_with_regex_characters() {
        assert_eq!(highlight("call foo.bar() now", "foo.bar()", "[", "]"), "call [foo.bar()] now");
    }

    #[test]
    fn test_highlight_no_match_escapes() {
        assert_eq!(highlight("a < b", "zzz", "[", "]"), "a &lt; b");
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  <p>Hello <em>world</em> &amp; co</p>\r"), "Hello world & co");
        assert_eq!(clean_line("<div></div>"), "");
    }
}
