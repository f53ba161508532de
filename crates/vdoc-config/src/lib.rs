//! Configuration management for vdoc.
//!
//! Parses `vdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_url`
//! - `site.http_prefix`
//! - `server.host`
//! - every entry of `[paths]`

mod expand;
mod translations;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use translations::Translations;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override base64 image inlining.
    pub base64_images: Option<bool>,
    /// Override sitemap generation.
    pub sitemap: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vdoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Public URL settings.
    pub site: SiteConfig,
    /// Published documentation versions.
    pub versions: VersionsConfig,
    /// Content locales.
    pub locales: LocalesConfig,
    /// Directory layout (relative strings from TOML).
    paths: PathsConfigRaw,
    /// Batch build options.
    pub build: BuildConfig,
    /// Heading anchor options.
    pub anchors: AnchorsConfig,
    /// Search options.
    pub search: SearchConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// UI strings per locale.
    pub translations: Translations,

    /// Resolved directory layout (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Public URL settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL, may contain a `{locale}` placeholder.
    pub base_url: String,
    /// Scheme prefix prepended to `base_url` (e.g. `https://`).
    pub http_prefix: String,
    /// Drop the locale from URLs of the default locale.
    pub remove_default_locale: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
            http_prefix: String::new(),
            remove_default_locale: false,
        }
    }
}

/// Published documentation versions.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Every version with a rendered tree.
    pub available: Vec<String>,
    /// Version served for empty and `latest` requests.
    pub default: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            available: vec!["1.0".to_owned()],
            default: "1.0".to_owned(),
        }
    }
}

/// Content locales.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Every locale with a content tree.
    pub available: Vec<String>,
    /// Locale used when none is requested.
    pub default: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            available: vec!["en".to_owned()],
            default: "en".to_owned(),
        }
    }
}

/// Raw directory layout as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    root: Option<String>,
    source: Option<String>,
    html: Option<String>,
    menu: Option<String>,
    images: Option<String>,
    sitemap: Option<String>,
}

/// Resolved directory layout with absolute paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Project root.
    pub root: PathBuf,
    /// Markdown tree, laid out as `{version}/{locale}/...`.
    pub source_dir: PathBuf,
    /// Rendered tree, laid out as `{version}/{locale}/...`.
    pub html_dir: PathBuf,
    /// Menu definitions, laid out as `{version}[/{locale}]/navigation.yaml`.
    pub menu_dir: PathBuf,
    /// Root that image `src` attributes resolve against.
    pub images_dir: PathBuf,
    /// Sitemap output file.
    pub sitemap_file: PathBuf,
}

/// Batch build options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Inline local images as `data:` URIs.
    pub base64_images: bool,
    /// Write a sitemap after generation.
    pub sitemap: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base64_images: false,
            sitemap: true,
        }
    }
}

/// Heading anchor options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnchorsConfig {
    /// Surface table-of-contents entries in the side navigation.
    pub enabled: bool,
    /// Also surface them on directory index pages.
    pub include_index_pages: bool,
    /// Comma-separated heading tags to extract.
    pub heading_query: String,
}

impl Default for AnchorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_index_pages: false,
            heading_query: "h2,h3,h4,h5,h6".to_owned(),
        }
    }
}

impl AnchorsConfig {
    /// Heading tag names selected by `heading_query`.
    #[must_use]
    pub fn heading_tags(&self) -> Vec<String> {
        self.heading_query
            .split(',')
            .map(|tag| tag.trim().to_ascii_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// Search options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Markup inserted before a highlighted word.
    pub highlight_open: String,
    /// Markup inserted after a highlighted word.
    pub highlight_close: String,
    /// Queries shorter than this return no results.
    pub min_query_len: usize,
    /// Queries with more keywords than this return no results.
    pub max_keywords: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            highlight_open: r#"<span style="background-color: yellow;">"#.to_owned(),
            highlight_close: "</span>".to_owned(),
            min_query_len: 3,
            max_keywords: 8,
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Failed to read the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid TOML.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A setting is missing or invalid. The message names the key.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable expansion failed.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config key being expanded.
        field: String,
        /// Description of the failure.
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_non_empty_list(values: &[String], field: &str) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    for value in values {
        require_non_empty(value, field)?;
    }
    Ok(())
}

fn require_member(value: &str, values: &[String], field: &str, list: &str) -> Result<(), ConfigError> {
    if !values.iter().any(|v| v == value) {
        return Err(ConfigError::Validation(format!(
            "{field} \"{value}\" is not listed in {list}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from an explicit path, or discover `vdoc.toml`.
    ///
    /// Without an explicit path the current directory and its parents are
    /// searched; if nothing is found the defaults rooted at the current
    /// directory are used.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(base64_images) = settings.base64_images {
            self.build.base64_images = base64_images;
        }
        if let Some(sitemap) = settings.sitemap {
            self.build.sitemap = sitemap;
        }
    }

    /// Map an empty or `latest` version to the default version.
    #[must_use]
    pub fn resolve_version<'a>(&'a self, version: &'a str) -> &'a str {
        if version.is_empty() || version == LATEST_VERSION {
            &self.versions.default
        } else {
            version
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfig::default(),
            versions: VersionsConfig::default(),
            locales: LocalesConfig::default(),
            paths: PathsConfigRaw::default(),
            build: BuildConfig::default(),
            anchors: AnchorsConfig::default(),
            search: SearchConfig::default(),
            server: ServerConfig::default(),
            translations: Translations::default(),
            paths_resolved: PathsConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_paths()?;
        self.validate_anchors()?;
        self.validate_search()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_url, "site.base_url")?;
        require_non_empty_list(&self.versions.available, "versions.available")?;
        require_non_empty(&self.versions.default, "versions.default")?;
        require_member(
            &self.versions.default,
            &self.versions.available,
            "versions.default",
            "versions.available",
        )?;
        if self.versions.available.iter().any(|v| v == LATEST_VERSION) {
            return Err(ConfigError::Validation(format!(
                "versions.available cannot contain the reserved name \"{LATEST_VERSION}\""
            )));
        }
        require_non_empty_list(&self.locales.available, "locales.available")?;
        require_non_empty(&self.locales.default, "locales.default")?;
        require_member(
            &self.locales.default,
            &self.locales.available,
            "locales.default",
            "locales.available",
        )
    }

    fn validate_paths(&self) -> Result<(), ConfigError> {
        for (value, field) in [
            (&self.paths.source, "paths.source"),
            (&self.paths.html, "paths.html"),
            (&self.paths.menu, "paths.menu"),
            (&self.paths.images, "paths.images"),
        ] {
            if let Some(value) = value {
                require_non_empty(value, field)?;
            }
        }
        Ok(())
    }

    fn validate_anchors(&self) -> Result<(), ConfigError> {
        let tags = self.anchors.heading_tags();
        if tags.is_empty() {
            return Err(ConfigError::Validation(
                "anchors.heading_query cannot be empty".to_owned(),
            ));
        }
        if let Some(bad) = tags.iter().find(|tag| !is_heading_tag(tag)) {
            return Err(ConfigError::Validation(format!(
                "anchors.heading_query contains \"{bad}\", expected h1 to h6"
            )));
        }
        Ok(())
    }

    fn validate_search(&self) -> Result<(), ConfigError> {
        if self.search.min_query_len == 0 {
            return Err(ConfigError::Validation(
                "search.min_query_len must be greater than 0".to_owned(),
            ));
        }
        if self.search.max_keywords == 0 {
            return Err(ConfigError::Validation(
                "search.max_keywords must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        self.site.http_prefix = expand::expand_env(&self.site.http_prefix, "site.http_prefix")?;
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        for (value, field) in [
            (&mut self.paths.root, "paths.root"),
            (&mut self.paths.source, "paths.source"),
            (&mut self.paths.html, "paths.html"),
            (&mut self.paths.menu, "paths.menu"),
            (&mut self.paths.images, "paths.images"),
            (&mut self.paths.sitemap, "paths.sitemap"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }

        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let root = config_dir.join(self.paths.root.as_deref().unwrap_or("."));
        let resolve = |path: Option<&str>, default: &str| root.join(path.unwrap_or(default));

        self.paths_resolved = PathsConfig {
            source_dir: resolve(self.paths.source.as_deref(), "docs"),
            html_dir: resolve(self.paths.html.as_deref(), "public/docs"),
            menu_dir: resolve(self.paths.menu.as_deref(), "menus"),
            images_dir: resolve(self.paths.images.as_deref(), "public"),
            sitemap_file: resolve(self.paths.sitemap.as_deref(), "public/sitemap.xml"),
            root,
        };
    }
}

/// Version alias that always resolves to the default version.
pub const LATEST_VERSION: &str = "latest";

fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_CONFIG: &str = r#"
[site]
base_url = "docs.example.com/{locale}/"
http_prefix = "https://"
remove_default_locale = true

[versions]
available = ["1.0", "2.0"]
default = "2.0"

[locales]
available = ["en", "tr"]
default = "en"

[paths]
source = "content"
html = "public/html"
menu = "nav"
images = "public"

[build]
base64_images = true
sitemap = false

[anchors]
heading_query = "h2, h3"

[translations.tr]
note = "Not"
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.paths_resolved.source_dir, PathBuf::from("/test/./docs"));
        assert_eq!(config.versions.default, "1.0");
        assert_eq!(config.locales.default, "en");
        assert!(config.build.sitemap);
        assert!(!config.build.base64_images);
        assert!(config.anchors.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.search.min_query_len, 3);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.site.base_url, "docs.example.com/{locale}/");
        assert!(config.site.remove_default_locale);
        assert_eq!(config.versions.available, vec!["1.0", "2.0"]);
        assert_eq!(config.locales.available, vec!["en", "tr"]);
        assert!(config.build.base64_images);
        assert!(!config.build.sitemap);
        assert_eq!(config.anchors.heading_tags(), vec!["h2", "h3"]);
        assert_eq!(config.translations.translate("note", "tr"), "Not");
    }

    #[test]
    fn test_load_resolves_paths_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        let root = dir.path().join(".");
        assert_eq!(config.paths_resolved.source_dir, root.join("content"));
        assert_eq!(config.paths_resolved.html_dir, root.join("public/html"));
        assert_eq!(config.paths_resolved.menu_dir, root.join("nav"));
        assert_eq!(config.paths_resolved.sitemap_file, root.join("public/sitemap.xml"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/vdoc.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let settings = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            base64_images: Some(false),
            sitemap: Some(true),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(!config.build.base64_images);
        assert!(config.build.sitemap);
    }

    #[test]
    fn test_validation_names_empty_locales_key() {
        let config: Config = toml::from_str("[locales]\navailable = []\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("locales.available"));
    }

    #[test]
    fn test_validation_names_empty_base_url() {
        let config: Config = toml::from_str("[site]\nbase_url = \"\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.base_url"));
    }

    #[test]
    fn test_validation_names_empty_html_path() {
        let config: Config = toml::from_str("[paths]\nhtml = \"\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("paths.html"));
    }

    #[test]
    fn test_validation_rejects_unknown_default_version() {
        let config: Config = toml::from_str(
            r#"
[versions]
available = ["1.0"]
default = "2.0"
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("versions.default"));
    }

    #[test]
    fn test_validation_rejects_latest_as_version() {
        let config: Config = toml::from_str(
            r#"
[versions]
available = ["latest"]
default = "latest"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_heading_query() {
        let config: Config = toml::from_str("[anchors]\nheading_query = \"h2,div\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("anchors.heading_query"));
    }

    #[test]
    fn test_validation_rejects_port_zero() {
        let config: Config = toml::from_str("[server]\nport = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_resolve_version() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.resolve_version(""), "2.0");
        assert_eq!(config.resolve_version("latest"), "2.0");
        assert_eq!(config.resolve_version("1.0"), "1.0");
    }

    #[test]
    fn test_load_expands_env_in_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VDOC_TEST_DOCS_HOST", "docs.test");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\nbase_url = \"${VDOC_TEST_DOCS_HOST}/{locale}/\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.site.base_url, "docs.test/{locale}/");
        unsafe {
            std::env::remove_var("VDOC_TEST_DOCS_HOST");
        }
    }
}
