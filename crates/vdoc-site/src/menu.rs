//! Menu definitions.
//!
//! A menu file is an ordered YAML list:
//!
//! ```yaml
//! - url: /a.html
//!   label: A
//! - url: /b/index.html
//!   label: B
//!   folder: b
//!   children:
//!     - url: /b/c.html
//!       label: C
//! ```
//!
//! Entries are validated once into [`MenuNode`]s. An entry with children must
//! declare a `folder` key; folder keys are indexed (lowercased) in a
//! [`FolderIndex`] for directory lookups.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

/// SEO metadata attached to a menu entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
}

/// A validated menu entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MenuNode {
    /// A single page.
    Leaf {
        url: String,
        label: String,
        meta: Option<PageMeta>,
    },
    /// A folder page owning nested entries.
    Folder {
        folder: String,
        url: String,
        label: String,
        meta: Option<PageMeta>,
        children: Vec<MenuNode>,
    },
}

impl MenuNode {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Leaf { url, .. } | Self::Folder { url, .. } => url,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Folder { label, .. } => label,
        }
    }

    #[must_use]
    pub fn meta(&self) -> Option<&PageMeta> {
        match self {
            Self::Leaf { meta, .. } | Self::Folder { meta, .. } => meta.as_ref(),
        }
    }

    /// Nested entries; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[MenuNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Folder { children, .. } => children,
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    /// Whether this entry points at `path` (leading `/` ignored).
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        same_url(self.url(), path)
    }
}

/// Compare menu URLs ignoring leading slashes.
pub(crate) fn same_url(a: &str, b: &str) -> bool {
    a.trim_start_matches('/') == b.trim_start_matches('/')
}

/// Menu entry as written in YAML.
#[derive(Debug, Deserialize)]
struct RawEntry {
    url: String,
    label: String,
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    meta: Option<PageMeta>,
    #[serde(default)]
    children: Vec<RawEntry>,
}

impl RawEntry {
    fn into_node(self) -> Result<MenuNode, NavigationError> {
        let folder = self.folder.map(|f| f.trim().to_owned()).filter(|f| !f.is_empty());
        match folder {
            Some(folder) => Ok(MenuNode::Folder {
                folder,
                url: self.url,
                label: self.label,
                meta: self.meta,
                children: self
                    .children
                    .into_iter()
                    .map(RawEntry::into_node)
                    .collect::<Result<_, _>>()?,
            }),
            None if !self.children.is_empty() => {
                Err(NavigationError::MissingFolder { url: self.url })
            }
            None => Ok(MenuNode::Leaf {
                url: self.url,
                label: self.label,
                meta: self.meta,
            }),
        }
    }
}

/// Folder key (lowercased) to the index path of the declaring entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderIndex(HashMap<String, Vec<usize>>);

impl FolderIndex {
    fn build(entries: &[MenuNode]) -> Result<Self, NavigationError> {
        let mut index = Self::default();
        index.collect(entries, &mut Vec::new())?;
        Ok(index)
    }

    fn collect(&mut self, entries: &[MenuNode], path: &mut Vec<usize>) -> Result<(), NavigationError> {
        for (i, entry) in entries.iter().enumerate() {
            path.push(i);
            if let MenuNode::Folder {
                folder, children, ..
            } = entry
            {
                let key = folder.to_lowercase();
                if self.0.contains_key(&key) {
                    return Err(NavigationError::DuplicateFolder(key));
                }
                self.0.insert(key, path.clone());
                self.collect(children, path)?;
            }
            path.pop();
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Folder keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn path(&self, folder: &str) -> Option<&[usize]> {
        self.0.get(&folder.to_lowercase()).map(Vec::as_slice)
    }
}

/// A loaded, read-only menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuNode>,
    folders: FolderIndex,
}

impl Menu {
    /// Load and validate a menu file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, is not a YAML
    /// list, has a parent entry without a `folder` key, or repeats a folder key.
    pub fn load(path: &Path) -> Result<Self, NavigationError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                NavigationError::MenuNotFound(path.to_path_buf())
            } else {
                NavigationError::MenuRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let menu = Self::from_yaml(&content, path)?;
        tracing::debug!(
            path = %path.display(),
            entries = menu.entries.len(),
            folders = menu.folders.len(),
            "Loaded menu"
        );
        Ok(menu)
    }

    /// Parse a menu from YAML; `origin` is used in error messages.
    ///
    /// # Errors
    ///
    /// See [`Menu::load`].
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, NavigationError> {
        let parse_error = |source| NavigationError::MenuParse {
            path: origin.to_path_buf(),
            source,
        };
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
        if !value.is_sequence() {
            return Err(NavigationError::MenuNotList(origin.to_path_buf()));
        }
        let raw: Vec<RawEntry> = serde_yaml::from_value(value).map_err(parse_error)?;
        let entries = raw
            .into_iter()
            .map(RawEntry::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Build a menu from validated nodes.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::DuplicateFolder`] if a folder key repeats.
    pub fn new(entries: Vec<MenuNode>) -> Result<Self, NavigationError> {
        let folders = FolderIndex::build(&entries)?;
        Ok(Self { entries, folders })
    }

    /// Top-level entries.
    #[must_use]
    pub fn entries(&self) -> &[MenuNode] {
        &self.entries
    }

    #[must_use]
    pub fn folder_index(&self) -> &FolderIndex {
        &self.folders
    }

    /// Children of the entry declaring `folder` (case-insensitive).
    #[must_use]
    pub fn folder_children(&self, folder: &str) -> Option<&[MenuNode]> {
        self.folder_entry(folder).map(MenuNode::children)
    }

    fn folder_entry(&self, folder: &str) -> Option<&MenuNode> {
        let (first, rest) = self.folders.path(folder)?.split_first()?;
        let mut node = self.entries.get(*first)?;
        for i in rest {
            node = node.children().get(*i)?;
        }
        Some(node)
    }

    /// Entries shown for a directory.
    ///
    /// The whole directory path is tried as a folder key first, then its
    /// first segment. Falls back to the full menu when neither names a folder
    /// with children.
    #[must_use]
    pub fn current_level(&self, directory: &str) -> &[MenuNode] {
        let directory = directory.trim_matches('/');
        if directory.is_empty() {
            return &self.entries;
        }
        let first = directory.split('/').next().unwrap_or(directory);
        [directory, first]
            .into_iter()
            .filter_map(|key| self.folder_children(key))
            .find(|children| !children.is_empty())
            .unwrap_or(&self.entries)
    }

    /// Find the entry for `path` anywhere in the tree.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&MenuNode> {
        find_in(&self.entries, path)
    }

    /// Label of the entry for `path`.
    #[must_use]
    pub fn find_label(&self, path: &str) -> Option<&str> {
        self.find(path).map(MenuNode::label)
    }
}

fn find_in<'m>(entries: &'m [MenuNode], path: &str) -> Option<&'m MenuNode> {
    entries.iter().find_map(|entry| {
        if entry.matches_path(path) {
            Some(entry)
        } else {
            find_in(entry.children(), path)
        }
    })
}

/// Entries in pre-order, each folder followed by its descendants.
#[must_use]
pub fn flatten(entries: &[MenuNode]) -> Vec<&MenuNode> {
    let mut out = Vec::new();
    flatten_into(entries, &mut out);
    out
}

fn flatten_into<'m>(entries: &'m [MenuNode], out: &mut Vec<&'m MenuNode>) {
    for entry in entries {
        out.push(entry);
        flatten_into(entry.children(), out);
    }
}
