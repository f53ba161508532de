//! Per-document state tracked while walking markdown events.

use pulldown_cmark::Alignment;

use crate::fence_attrs::FenceInfo;

/// State for fenced and indented code blocks.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    info: Option<FenceInfo>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, info: Option<FenceInfo>) {
        self.active = true;
        self.info = info;
        self.buffer.clear();
    }

    /// Finish the block, returning its parsed info and raw content.
    pub(crate) fn end(&mut self) -> (Option<FenceInfo>, String) {
        self.active = false;
        (self.info.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }
}

/// State for table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for image alt text capture.
#[derive(Default)]
pub(crate) struct ImageState {
    depth: usize,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt_text.clear();
        }
        self.depth += 1;
    }

    /// Returns the collected alt text once the outermost image closes.
    pub(crate) fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        (self.depth == 0).then(|| std::mem::take(&mut self.alt_text))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.alt_text.push_str(s);
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_table_alignment() {
        let mut table = TableState::default();
        table.start(vec![Alignment::None, Alignment::Right]);
        table.start_row();
        assert_eq!(table.current_alignment_style(), "");
        table.next_cell();
        assert_eq!(table.current_alignment_style(), r#" style="text-align:right""#);
    }

    #[test]
    fn test_nested_image_alt_text() {
        let mut image = ImageState::default();
        image.start();
        image.push_str("outer ");
        image.start();
        image.push_str("inner");
        assert_eq!(image.end(), None);
        assert!(image.is_active());
        assert_eq!(image.end().as_deref(), Some("outer inner"));
    }
}
