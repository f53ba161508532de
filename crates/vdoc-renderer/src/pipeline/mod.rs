//! Ordered HTML post-processing.
//!
//! Rendered markdown passes through a fixed list of [`Stage`]s. Each stage is
//! a pure `HTML -> HTML` rewrite; a stage whose pattern does not match leaves
//! the input untouched. The only failure is environmental (an images root that
//! does not exist while base64 inlining is on), and the [`Pipeline`] reports it
//! with the name of the failing stage.
//!
//! ```ignore
//! let ctx = PostProcessContext::new("/docs/", "2.0", "en", &translations);
//! let html = Pipeline::standard().run(&rendered, &ctx)?;
//! ```

mod balanced;
mod blocks;
mod icons;
mod images;
pub(crate) mod links;
mod tabs;

use std::path::{Path, PathBuf};

use vdoc_config::Translations;

use crate::markdown::MarkdownRenderer;

pub use images::{IMAGE_CLASS, image_mime};
pub use links::resolve_link;

/// Locale-keyed string lookup used for alert titles and UI labels.
pub trait Translate {
    /// Translate `key` into `locale`.
    fn translate(&self, key: &str, locale: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &str) -> String,
{
    fn translate(&self, key: &str, locale: &str) -> String {
        self(key, locale)
    }
}

impl Translate for Translations {
    fn translate(&self, key: &str, locale: &str) -> String {
        Translations::translate(self, key, locale)
    }
}

/// GitHub-style alert kinds, written as `> [!NOTE]` in markdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// All kinds in rewrite order.
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Note,
        AlertKind::Tip,
        AlertKind::Important,
        AlertKind::Warning,
        AlertKind::Caution,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Marker text between `[!` and `]`.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Note => "NOTE",
            Self::Tip => "TIP",
            Self::Important => "IMPORTANT",
            Self::Warning => "WARNING",
            Self::Caution => "CAUTION",
        }
    }

    /// Translation key of the alert title.
    #[must_use]
    pub fn translation_key(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Bootstrap contextual class suffix (`alert-{class}`).
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Note => "info",
            Self::Tip => "success",
            Self::Important => "primary",
            Self::Warning => "warning",
            Self::Caution => "danger",
        }
    }

    /// Inline SVG shown before the title.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Note => icons::SVG_INFO,
            Self::Tip => icons::SVG_LIGHTBULB,
            Self::Important => icons::SVG_REPORT,
            Self::Warning => icons::SVG_ALERT,
            Self::Caution => icons::SVG_STOP,
        }
    }
}

/// Errors raised while post-processing a page.
#[derive(Debug, thiserror::Error)]
pub enum PostProcessError {
    /// Base64 inlining is enabled but its root directory is missing.
    #[error("images root not found: {}", .0.display())]
    ImagesRoot(PathBuf),

    /// A stage failed; carries the stage name.
    #[error("post-processing stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<PostProcessError>,
    },
}

/// Per-page inputs shared by every stage.
#[derive(Clone, Copy)]
pub struct PostProcessContext<'a> {
    /// Site URL with the locale already substituted, ending in `/`.
    pub base_url: &'a str,
    pub version: &'a str,
    pub locale: &'a str,
    pub translator: &'a dyn Translate,
    /// Root for base64 image inlining; `None` disables inlining.
    pub images_root: Option<&'a Path>,
}

impl<'a> PostProcessContext<'a> {
    #[must_use]
    pub fn new(
        base_url: &'a str,
        version: &'a str,
        locale: &'a str,
        translator: &'a dyn Translate,
    ) -> Self {
        Self {
            base_url,
            version,
            locale,
            translator,
            images_root: None,
        }
    }

    /// Enable base64 image inlining from `root`.
    #[must_use]
    pub fn with_images_root(mut self, root: &'a Path) -> Self {
        self.images_root = Some(root);
        self
    }
}

/// One post-processing rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    InternalLinks,
    UnescapeBackticks,
    WrapTables,
    Alert(AlertKind),
    Blockquote,
    Tabs,
    ImageClass,
    InlineImages,
}

impl Stage {
    /// Canonical stage order.
    ///
    /// Alerts come before generic blockquote styling so a `[!NOTE]` quote is
    /// never styled as a plain blockquote. Inlining runs last so it only sees
    /// finished `<img>` tags.
    pub const ORDER: [Stage; 12] = [
        Stage::InternalLinks,
        Stage::UnescapeBackticks,
        Stage::WrapTables,
        Stage::Alert(AlertKind::Note),
        Stage::Alert(AlertKind::Tip),
        Stage::Alert(AlertKind::Important),
        Stage::Alert(AlertKind::Warning),
        Stage::Alert(AlertKind::Caution),
        Stage::Blockquote,
        Stage::Tabs,
        Stage::ImageClass,
        Stage::InlineImages,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::InternalLinks => "internal-links",
            Self::UnescapeBackticks => "unescape-backticks",
            Self::WrapTables => "wrap-tables",
            Self::Alert(AlertKind::Note) => "alert-note",
            Self::Alert(AlertKind::Tip) => "alert-tip",
            Self::Alert(AlertKind::Important) => "alert-important",
            Self::Alert(AlertKind::Warning) => "alert-warning",
            Self::Alert(AlertKind::Caution) => "alert-caution",
            Self::Blockquote => "blockquote",
            Self::Tabs => "tabs",
            Self::ImageClass => "image-class",
            Self::InlineImages => "inline-images",
        }
    }

    /// Apply this stage to `html`.
    ///
    /// # Errors
    ///
    /// Returns an error only when base64 inlining is enabled and the images
    /// root does not exist.
    pub fn apply(self, html: &str, ctx: &PostProcessContext<'_>) -> Result<String, PostProcessError> {
        Ok(match self {
            Self::InternalLinks => links::rewrite_links(html, ctx.base_url, ctx.version),
            Self::UnescapeBackticks => blocks::unescape_backticks(html),
            Self::WrapTables => blocks::wrap_tables(html),
            Self::Alert(kind) => blocks::rewrite_alert(html, kind, ctx.translator, ctx.locale),
            Self::Blockquote => blocks::style_blockquotes(html),
            Self::Tabs => expand_tabs(html, tabs::ROOT_PREFIX, ctx)?,
            Self::ImageClass => images::add_image_class(html),
            Self::InlineImages => match ctx.images_root {
                Some(root) => images::inline_images(html, root)?,
                None => html.to_owned(),
            },
        })
    }
}

/// Expand tab groups whose ids start with `prefix`. Columns go through the
/// stages before [`Stage::Tabs`], then through this expansion again so a
/// group nested in a pane is numbered under that pane's id.
fn expand_tabs(html: &str, prefix: &str, ctx: &PostProcessContext<'_>) -> Result<String, PostProcessError> {
    let columns = Pipeline::before(Stage::Tabs);
    tabs::render_tab_groups(html, prefix, |markdown, pane| {
        let rendered = MarkdownRenderer::new().render_markdown(markdown);
        let html = columns.run(&rendered.html, ctx)?;
        expand_tabs(&html, &format!("{pane}-"), ctx)
    })
}

/// Runs stages in order, stopping at the first failure.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Pipeline over an explicit stage list.
    #[must_use]
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Every stage in [`Stage::ORDER`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Stage::ORDER.to_vec())
    }

    /// The stages of [`Stage::ORDER`] that precede `stage`.
    #[must_use]
    pub fn before(stage: Stage) -> Self {
        Self::new(Stage::ORDER.into_iter().take_while(|s| *s != stage).collect())
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage over `html`.
    ///
    /// # Errors
    ///
    /// Returns [`PostProcessError::Stage`] naming the first stage that failed.
    pub fn run(&self, html: &str, ctx: &PostProcessContext<'_>) -> Result<String, PostProcessError> {
        let mut current = html.to_owned();
        for stage in &self.stages {
            current = stage
                .apply(&current, ctx)
                .map_err(|source| PostProcessError::Stage {
                    stage: stage.name(),
                    source: Box::new(source),
                })?;
            tracing::trace!(stage = stage.name(), len = current.len(), "Applied stage");
        }
        Ok(current)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
