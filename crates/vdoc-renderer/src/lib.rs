//! Markdown rendering and HTML post-processing for vdoc.
//!
//! A page goes through three steps:
//!
//! 1. [`MarkdownRenderer`] turns markdown into HTML, one block element per
//!    line. Fenced code blocks accept an attribute string
//!    (see [`FenceInfo`]).
//! 2. [`Pipeline`] applies the ordered [`Stage`] rewrites: internal links,
//!    tables, alerts, blockquotes, tab groups and images.
//! 3. [`AnchorExtractor`] inserts heading anchors and returns the headings
//!    for the table of contents.
//!
//! # Example
//!
//! ```
//! use vdoc_renderer::{AnchorExtractor, MarkdownRenderer, Pipeline, PostProcessContext};
//!
//! let english = |key: &str, _locale: &str| key.to_owned();
//! let rendered = MarkdownRenderer::new().render_markdown("## Setup\n\nSee [install](install.md).");
//! let ctx = PostProcessContext::new("/docs/", "1.0", "en", &english);
//! let html = Pipeline::standard().run(&rendered.html, &ctx).unwrap();
//! let page = AnchorExtractor::new(vec!["h2".to_owned()]).extract(&html);
//!
//! assert!(page.html.contains(r#"href="/docs/1.0/install.html""#));
//! assert_eq!(page.headings[0].anchor_id, "0-Setup");
//! ```

mod anchors;
mod fence;
pub mod fence_attrs;
mod markdown;
mod pipeline;
mod state;
mod tab_stash;

pub use anchors::{AnchorExtractor, AnchorResult, HeadingEntry, anchor_name, toc_html};
pub use fence_attrs::{AttrValue, FenceInfo, NULL_VALUE, Section};
pub use markdown::{MarkdownRenderer, RenderResult};
pub use pipeline::{
    AlertKind, IMAGE_CLASS, Pipeline, PostProcessContext, PostProcessError, Stage, Translate,
    image_mime, resolve_link,
};
pub use state::escape_html;
