//! Lifts `<tab>` blocks out of markdown before rendering.
//!
//! Tab groups carry markdown inside custom tags, which `CommonMark` would
//! otherwise split into HTML fragments and paragraphs. Each block is swapped
//! for an HTML comment placeholder, rendered around, and restored verbatim so
//! the tab-group stage sees the original source.

use super::fence::FenceScanner;

const OPEN_TAG: &str = "<tab>";
const CLOSE_TAG: &str = "</tab>";

/// Stashed tab blocks and the markdown with placeholders in their place.
#[derive(Debug, Default)]
pub(crate) struct TabStash {
    blocks: Vec<String>,
    warnings: Vec<String>,
}

impl TabStash {
    /// Replace every top-level `<tab>` block outside code fences with a placeholder.
    pub(crate) fn extract(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut fence = FenceScanner::default();
        let mut pending: Option<Pending> = None;

        for (idx, line) in input.lines().enumerate() {
            if let Some(mut open) = pending.take() {
                open.block.push('\n');
                open.block.push_str(line);
                open.depth = (open.depth + tag_balance(line)).max(0);
                if open.depth == 0 {
                    self.push_block(open.block, &mut output);
                } else {
                    pending = Some(open);
                }
                continue;
            }

            fence.feed(line);
            if !fence.inside() && line.trim_start().starts_with(OPEN_TAG) {
                let depth = tag_balance(line);
                if depth <= 0 {
                    self.push_block(line.to_owned(), &mut output);
                } else {
                    pending = Some(Pending {
                        start_line: idx + 1,
                        depth,
                        block: line.to_owned(),
                    });
                }
                continue;
            }

            output.push_str(line);
            output.push('\n');
        }

        if let Some(open) = pending {
            self.warnings.push(format!(
                "line {}: unclosed <tab> block, left as markdown",
                open.start_line
            ));
            output.push_str(&open.block);
            output.push('\n');
        }

        output
    }

    /// Put stashed blocks back in place of their placeholders.
    pub(crate) fn restore(&self, html: &str) -> String {
        let mut html = html.to_owned();
        for (id, block) in self.blocks.iter().enumerate() {
            html = html.replacen(&placeholder(id), block, 1);
        }
        html
    }

    pub(crate) fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn push_block(&mut self, block: String, output: &mut String) {
        let id = self.blocks.len();
        self.blocks.push(block);
        output.push('\n');
        output.push_str(&placeholder(id));
        output.push_str("\n\n");
    }
}

/// A `<tab>` block still waiting for its matching close tag.
struct Pending {
    start_line: usize,
    depth: isize,
    block: String,
}

/// Open tags minus close tags on one line.
fn tag_balance(line: &str) -> isize {
    line.matches(OPEN_TAG).count().cast_signed() - line.matches(CLOSE_TAG).count().cast_signed()
}

fn placeholder(id: usize) -> String {
    format!("<!-- vdoc-tab:{id} -->")
}
