//! Markdown to HTML renderer.
//!
//! Walks pulldown-cmark events and writes HTML with one block element per
//! line, so the rendered files can be searched line by line. Fenced code
//! blocks accept the attribute grammar from [`crate::fence_attrs`].

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::fence_attrs::FenceInfo;
use crate::state::{CodeBlockState, ImageState, TableState, escape_html};
use crate::tab_stash::TabStash;

/// Result of rendering a markdown document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Non-fatal problems found in the source (e.g. an unclosed `<tab>` block).
    pub warnings: Vec<String>,
}

/// Markdown renderer.
///
/// Heading elements are written without ids; anchors are added later by
/// [`AnchorExtractor`](crate::AnchorExtractor).
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    pending_image: Option<(String, String)>,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            pending_image: None,
        }
    }

    /// Parser options used for every document.
    ///
    /// GitHub alert syntax is deliberately not enabled: `[!NOTE]` markers stay
    /// literal text and are rewritten by the post-processing pipeline.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }

    /// Render a full markdown document.
    ///
    /// `<tab>` blocks are kept out of the markdown pass and restored verbatim
    /// in the output.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let mut stash = TabStash::default();
        let prepared = stash.extract(markdown);
        let html = self.render(Parser::new_ext(&prepared, Self::parser_options()));

        RenderResult {
            html: stash.restore(&html),
            warnings: stash.take_warnings(),
        }
    }

    /// Render a short fragment and drop the wrapping `<p>` tags.
    #[must_use]
    pub fn render_inline(markdown: &str) -> String {
        let html = Self::new().render(Parser::new_ext(markdown, Self::parser_options()));
        html.replace("<p>", "").replace("</p>", "").trim().to_owned()
    }

    /// Render markdown events and return the HTML.
    pub fn render<'a, I>(&mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br />\n"),
            Event::Rule => self.output.push_str("<hr />\n"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    /// Push inline markup unless we are collecting image alt text.
    fn push_inline(&mut self, content: &str) {
        if !self.image.is_active() {
            self.output.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                self.output.push_str(&format!("<{level}>"));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                        Some(FenceInfo::parse(&info))
                    }
                    _ => None,
                };
                self.code.start(info);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>\n"),
                Some(n) => self.output.push_str(&format!("<ol start=\"{n}\">\n")),
                None => self.output.push_str("<ul>\n"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>\n");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead>\n<tr>\n");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>\n");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let cell = if self.table.is_in_head() { "th" } else { "td" };
                self.output.push_str(&format!("<{cell}{align}>"));
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let link = format!(
                    "<a href=\"{}\"{}>",
                    escape_html(&dest_url),
                    title_attr(&title)
                );
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.start();
                if self.pending_image.is_none() {
                    self.pending_image = Some((dest_url.to_string(), title.to_string()));
                }
            }
            Tag::DefinitionList => self.output.push_str("<dl>\n"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(level) => {
                self.output.push_str(&format!("</{level}>\n"));
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                let (info, content) = self.code.end();
                self.code_block(info.as_ref(), &content);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::Table => self.output.push_str("</tbody>\n</table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr>\n</thead>\n<tbody>\n");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>\n"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>\n"
                } else {
                    "</td>\n"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(alt) = self.image.end()
                    && let Some((src, title)) = self.pending_image.take()
                {
                    self.output.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\"{}>",
                        escape_html(&src),
                        escape_html(&alt),
                        title_attr(&title)
                    ));
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>\n"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>\n"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>\n"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn code_block(&mut self, info: Option<&FenceInfo>, content: &str) {
        self.output.push_str("<pre><code");
        if let Some(info) = info {
            let classes = info.classes();
            if !classes.is_empty() {
                self.output
                    .push_str(&format!(" class=\"{}\"", escape_html(&classes.join(" "))));
            }
            for (name, value) in info.attributes() {
                self.output
                    .push_str(&format!(" {}=\"{}\"", escape_html(&name), escape_html(&value)));
            }
        }
        self.output.push('>');
        self.output.push_str(&escape_html(content));
        self.output.push_str("</code></pre>\n");
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else {
            self.output
                .push_str(&format!("<code>{}</code>", escape_html(code)));
        }
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.output.push('\n');
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        self.output.push_str(if checked {
            r#"<input type="checkbox" disabled checked /> "#
        } else {
            r#"<input type="checkbox" disabled /> "#
        });
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn title_attr(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" title=\"{}\"", escape_html(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new().render_markdown(markdown).html
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render("Hello, world!"), "<p>Hello, world!</p>\n");
    }

    #[test]
    fn test_heading_has_no_id() {
        assert_eq!(render("## Install"), "<h2>Install</h2>\n");
    }

    #[test]
    fn test_fenced_code_with_root_attribute() {
        let html = render("```bash data-line=\"2,4-8\"\necho hi\n```\n");
        assert_eq!(
            html,
            "<pre><code class=\"language-bash\" data-line=\"2,4-8\">echo hi\n</code></pre>\n"
        );
    }

    #[test]
    fn test_fenced_code_with_sections() {
        let html = render("```bash [line-highlight] data-line=1 [command-line] data-user=root\nls\n```\n");
        assert_eq!(
            html,
            "<pre><code class=\"language-bash line-highlight command-line\" data-line=\"1\" data-user=\"root\">ls\n</code></pre>\n"
        );
    }

    #[test]
    fn test_fenced_code_without_info() {
        assert_eq!(
            render("```\n<b>\n```\n"),
            "<pre><code>&lt;b&gt;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_alert_marker_stays_literal() {
        let html = render("> [!NOTE]\n> Read this.");
        assert_eq!(html, "<blockquote>\n<p>[!NOTE]\nRead this.</p>\n</blockquote>\n");
    }

    #[test]
    fn test_table_one_element_per_line() {
        let html = render("| A | B |\n|---|--:|\n| 1 | 2 |\n");
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n<th>A</th>\n<th style=\"text-align:right\">B</th>\n</tr>\n</thead>\n<tbody>\n<tr>\n<td>1</td>\n<td style=\"text-align:right\">2</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_image_alt_text() {
        assert_eq!(
            render("![A *cat*](img/cat.png \"Cat\")"),
            "<p><img src=\"img/cat.png\" alt=\"A cat\" title=\"Cat\"></p>\n"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[Guide](guide.md)"),
            "<p><a href=\"guide.md\">Guide</a></p>\n"
        );
    }

    #[test]
    fn test_tab_block_is_restored_verbatim() {
        let source = "Before\n\n<tab>\n<tab-title>A|B</tab-title>\n<tab-content>\n<tab-column>**one**</tab-column>\n<tab-column>two</tab-column>\n</tab-content>\n</tab>\n\nAfter\n";
        let html = render(source);
        assert!(html.starts_with("<p>Before</p>\n"));
        assert!(html.contains("<tab-column>**one**</tab-column>"));
        assert!(html.ends_with("<p>After</p>\n"));
    }

    #[test]
    fn test_render_inline_strips_paragraph() {
        assert_eq!(MarkdownRenderer::render_inline("**macOS**"), "<strong>macOS</strong>");
    }

    #[test]
    fn test_lists() {
        assert_eq!(render("- a\n- b\n"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
        assert_eq!(render("3. c\n"), "<ol start=\"3\">\n<li>c</li>\n</ol>\n");
    }
}
