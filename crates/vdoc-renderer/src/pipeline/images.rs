//! `<img>` rewrites: responsive class and base64 inlining.

use std::fs;
use std::path::{Component, Path};
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::{Captures, Regex};

use super::PostProcessError;

/// Class appended to every image.
pub const IMAGE_CLASS: &str = "img-fluid";

/// An `<img>` tag, capturing its attribute text without the closing `>`/`/>`.
static IMG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b([^>]*?)\s*/?>").unwrap());
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\sclass=")([^"]*)""#).unwrap());
static SRC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(\ssrc=")([^"]*)""#).unwrap());
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// MIME type for an allowed image extension (case-insensitive).
#[must_use]
pub fn image_mime(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Append [`IMAGE_CLASS`] to every `<img>` that does not carry it yet.
pub(crate) fn add_image_class(html: &str) -> String {
    IMG_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let attrs = &caps[1];
            let attrs = match CLASS_RE.captures(attrs) {
                Some(class) if class[2].split_whitespace().any(|c| c == IMAGE_CLASS) => {
                    attrs.to_owned()
                }
                Some(_) => CLASS_RE
                    .replace(attrs, |class: &Captures<'_>| {
                        let existing = class[2].trim();
                        if existing.is_empty() {
                            format!("{}{IMAGE_CLASS}\"", &class[1])
                        } else {
                            format!("{}{existing} {IMAGE_CLASS}\"", &class[1])
                        }
                    })
                    .into_owned(),
                None => format!("{attrs} class=\"{IMAGE_CLASS}\""),
            };
            format!("<img{attrs} />")
        })
        .into_owned()
}

/// Replace local image sources under `root` with `data:` URIs.
///
/// Images that are missing, unreadable or of a disallowed type keep their
/// original `src`.
pub(crate) fn inline_images(html: &str, root: &Path) -> Result<String, PostProcessError> {
    if !root.is_dir() {
        return Err(PostProcessError::ImagesRoot(root.to_path_buf()));
    }

    Ok(IMG_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let tag = &caps[0];
            SRC_RE
                .replace(tag, |src: &Captures<'_>| match data_uri(&src[2], root) {
                    Some(uri) => format!("{}{uri}\"", &src[1]),
                    None => src[0].to_owned(),
                })
                .into_owned()
        })
        .into_owned())
}

fn data_uri(src: &str, root: &Path) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("//") || SCHEME_RE.is_match(src) {
        return None;
    }
    let relative = Path::new(src.split(['?', '#']).next().unwrap_or(src).trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    let mime = image_mime(relative.extension()?.to_str()?)?;

    let path = root.join(relative);
    if !path.is_file() {
        return None;
    }
    match fs::read(&path) {
        Ok(bytes) => Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes))),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read image, keeping src");
            None
        }
    }
}
