//! Batch site generation.
//!
//! [`Builder::generate`] renders every Markdown file of every configured
//! version and locale into the HTML tree, then writes the sitemap.
//! Documents are rendered in parallel; the sitemap is written once, after
//! all pages, in sorted order.

mod error;
mod sitemap;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use vdoc_config::Config;
use vdoc_renderer::{MarkdownRenderer, Pipeline, PostProcessContext};
use vdoc_site::{SiteUrls, collect_files, html_root, source_root};

pub use error::BuildError;
pub use sitemap::sitemap_xml;

/// A page written by a build.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BuiltPage {
    pub version: String,
    pub locale: String,
    /// Output path relative to the locale root, `/`-separated.
    pub path: String,
}

/// Outcome of [`Builder::generate`].
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written pages, sorted.
    pub pages: Vec<BuiltPage>,
    /// Stale `.html` files removed before rendering.
    pub removed: usize,
    /// Non-fatal renderer warnings.
    pub warnings: Vec<String>,
    /// Sitemap file, when one was written.
    pub sitemap: Option<PathBuf>,
}

struct SourceDocument {
    version: String,
    locale: String,
    relative: String,
    path: PathBuf,
}

/// Builds the HTML tree for one configuration.
pub struct Builder<'a> {
    config: &'a Config,
    pipeline: Pipeline,
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            pipeline: Pipeline::standard(),
        }
    }

    /// Render every source document and write the sitemap.
    ///
    /// Missing `{version}/{locale}` source trees are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the first error hit by any document. Pages rendered before
    /// the failure stay on disk.
    pub fn generate(&self) -> Result<BuildReport, BuildError> {
        let removed = self.remove()?;
        let documents = self.collect_documents()?;
        tracing::info!(documents = documents.len(), "Rendering documents");

        let rendered = documents
            .par_iter()
            .map(|doc| self.render_document(doc))
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = BuildReport {
            removed,
            ..BuildReport::default()
        };
        for (page, warnings) in rendered {
            report.pages.push(page);
            report.warnings.extend(warnings);
        }
        report.pages.sort();

        if self.config.build.sitemap {
            report.sitemap = Some(self.write_sitemap(&report.pages)?);
        }
        Ok(report)
    }

    /// Delete every rendered `.html` file. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be walked or a file cannot be
    /// deleted.
    pub fn remove(&self) -> Result<usize, BuildError> {
        let html_dir = &self.config.paths_resolved.html_dir;
        if !html_dir.is_dir() {
            return Ok(0);
        }
        let files = collect_files(html_dir, "html").map_err(|source| BuildError::Read {
            path: html_dir.clone(),
            source,
        })?;
        for (_, path) in &files {
            fs::remove_file(path).map_err(|source| BuildError::Write {
                path: path.clone(),
                source,
            })?;
        }
        tracing::debug!(dir = %html_dir.display(), count = files.len(), "Removed rendered pages");
        Ok(files.len())
    }

    /// Render one Markdown document to post-processed HTML.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Render`] if post-processing fails.
    pub fn render(
        &self,
        markdown: &str,
        version: &str,
        locale: &str,
        origin: &Path,
    ) -> Result<(String, Vec<String>), BuildError> {
        let urls = self.urls(locale);
        let images_root = &self.config.paths_resolved.images_dir;
        let mut ctx =
            PostProcessContext::new(urls.base(), version, locale, &self.config.translations);
        if self.config.build.base64_images {
            ctx = ctx.with_images_root(images_root);
        }

        let result = MarkdownRenderer::new().render_markdown(markdown);
        let html = self
            .pipeline
            .run(&result.html, &ctx)
            .map_err(|source| BuildError::Render {
                path: origin.to_path_buf(),
                source,
            })?;
        let warnings = result
            .warnings
            .into_iter()
            .map(|warning| format!("{}: {warning}", origin.display()))
            .collect();
        Ok((html, warnings))
    }

    fn urls(&self, locale: &str) -> SiteUrls {
        SiteUrls::new(&self.config.site, locale, &self.config.locales.default)
    }

    fn collect_documents(&self) -> Result<Vec<SourceDocument>, BuildError> {
        let paths = &self.config.paths_resolved;
        let mut documents = Vec::new();
        for version in &self.config.versions.available {
            for locale in &self.config.locales.available {
                let root = source_root(paths, version, locale);
                if !root.is_dir() {
                    tracing::warn!(root = %root.display(), "Source tree not found, skipping");
                    continue;
                }
                let files = collect_files(&root, "md").map_err(|source| BuildError::Read {
                    path: root.clone(),
                    source,
                })?;
                documents.extend(files.into_iter().map(|(relative, path)| SourceDocument {
                    version: version.clone(),
                    locale: locale.clone(),
                    relative,
                    path,
                }));
            }
        }
        Ok(documents)
    }

    fn render_document(&self, doc: &SourceDocument) -> Result<(BuiltPage, Vec<String>), BuildError> {
        let markdown = fs::read_to_string(&doc.path).map_err(|source| BuildError::Read {
            path: doc.path.clone(),
            source,
        })?;
        let (html, warnings) = self.render(&markdown, &doc.version, &doc.locale, &doc.path)?;
        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        let relative = html_file_name(&doc.relative);
        let mut target = html_root(&self.config.paths_resolved, &doc.version, &doc.locale);
        target.extend(relative.split('/'));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, html).map_err(|source| BuildError::Write {
            path: target.clone(),
            source,
        })?;
        tracing::debug!(path = %target.display(), "Rendered page");

        Ok((
            BuiltPage {
                version: doc.version.clone(),
                locale: doc.locale.clone(),
                path: relative,
            },
            warnings,
        ))
    }

    fn write_sitemap(&self, pages: &[BuiltPage]) -> Result<PathBuf, BuildError> {
        let path = self.config.paths_resolved.sitemap_file.clone();
        let locations: Vec<String> = pages
            .iter()
            .map(|page| self.urls(&page.locale).page_url(&page.version, &page.path))
            .collect();

        let write = || -> std::io::Result<()> {
            let xml = sitemap_xml(&locations, Utc::now())?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, xml)
        };
        write().map_err(|source| BuildError::Sitemap {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), urls = locations.len(), "Wrote sitemap");
        Ok(path)
    }
}

/// `guide/install.md` becomes `guide/install.html`.
fn html_file_name(relative: &str) -> String {
    let stem = relative.strip_suffix(".md").unwrap_or(relative);
    format!("{stem}.html")
}
