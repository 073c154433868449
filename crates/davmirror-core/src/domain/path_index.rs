//! Path index - the flattened view of a content tree
//!
//! The [`PathIndex`] maps each relative file path to its metadata and
//! download URL. It is the currency of the whole sync pipeline: the
//! differ compares a fresh index against the manifest snapshot, and the
//! scheduler advances manifest entries path by path.
//!
//! Backed by a `BTreeMap`, so enumeration is lexicographic and
//! deterministic — required for listings and script generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::content::{Content, ContentKind};

/// Metadata held for one indexed file path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub kind: ContentKind,
    /// Opaque last-modified token, compared for equality only
    pub modified: String,
    pub size: Option<u64>,
    /// Provider download URL for this path
    pub url: String,
}

/// Mapping from relative file path to [`IndexEntry`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl PathIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a content tree: flattens the tree and derives
    /// each file's download URL from `root_url`.
    ///
    /// Directories are not indexed. Duplicate relative paths overwrite
    /// the earlier entry (remote names are assumed unique per directory).
    pub fn from_tree(tree: &[Content], root_url: &str) -> Self {
        let mut index = Self::new();
        for (path, content) in flatten(tree) {
            let url = download_url(root_url, &path);
            index.insert(
                path,
                IndexEntry {
                    kind: content.kind,
                    modified: content.modified.clone(),
                    size: content.size,
                    url,
                },
            );
        }
        index
    }

    pub fn insert(&mut self, path: String, entry: IndexEntry) {
        self.entries.insert(path, entry);
    }

    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    /// All indexed paths, lexicographically sorted.
    pub fn paths(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Keeps only the entries whose path satisfies `keep`.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.entries.retain(|path, _| keep(path));
    }
}

impl FromIterator<(String, IndexEntry)> for PathIndex {
    fn from_iter<I: IntoIterator<Item = (String, IndexEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Flattens a content tree into `(relative_path, node)` pairs.
///
/// Only file nodes are emitted; ancestor directory names are joined with
/// `/`. The result is deterministic for a given tree.
pub fn flatten(tree: &[Content]) -> Vec<(String, &Content)> {
    fn walk<'a>(nodes: &'a [Content], prefix: &str, out: &mut Vec<(String, &'a Content)>) {
        for node in nodes {
            let path = if prefix.is_empty() {
                node.name.clone()
            } else {
                format!("{}/{}", prefix, node.name)
            };
            match node.kind {
                ContentKind::File => out.push((path, node)),
                ContentKind::Directory => walk(&node.children, &path, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(tree, "", &mut out);
    out
}

/// Derives the provider download URL for a relative file path.
///
/// The parent directory component has its separators escaped as `%2F`
/// and the leaf filename is appended as a query parameter, matching the
/// ownCloud public-share download endpoint. Pure: identical inputs yield
/// the identical string.
pub fn download_url(root_url: &str, rel_path: &str) -> String {
    let (dir_path, basename) = match rel_path.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", rel_path),
    };

    format!(
        "{}/download?path={}&files={}",
        root_url.trim_end_matches('/'),
        dir_path.replace('/', "%2F"),
        basename
    )
}
