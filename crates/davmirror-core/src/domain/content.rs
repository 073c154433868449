//! Remote content tree
//!
//! A [`Content`] node describes one remote entry (file or directory) with
//! its metadata and, for directories, its children. Trees are assembled
//! from the flat listings that remote listers produce via [`build_tree`].
//!
//! Names are stored relative to the immediate parent: assembling the tree
//! strips each directory's name as a path prefix from all of its
//! descendants.

use serde::{Deserialize, Serialize};

/// Kind of a remote entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A regular file
    File,
    /// A directory / WebDAV collection
    Directory,
}

/// One record of a flat remote listing
///
/// `path` is slash-separated and relative to the share root. `modified`
/// is an opaque timestamp token: the sync engine only ever compares it
/// for equality, so its format is whatever the lister reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub kind: ContentKind,
    pub path: String,
    pub modified: String,
    pub size: Option<u64>,
}

/// One node of the remote content tree
///
/// Invariant: `children` is non-empty only when `kind` is
/// [`ContentKind::Directory`]. A file node never carries children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// File or directory
    pub kind: ContentKind,
    /// Name relative to the immediate parent
    pub name: String,
    /// Opaque last-modified token (equality comparisons only)
    pub modified: String,
    /// Size in bytes, when the listing reports one
    pub size: Option<u64>,
    /// Child nodes (directories only)
    pub children: Vec<Content>,
}

impl Content {
    /// Creates a file node.
    pub fn file(name: impl Into<String>, modified: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::File,
            name: name.into(),
            modified: modified.into(),
            size: None,
            children: Vec::new(),
        }
    }

    /// Creates a directory node with no children.
    pub fn directory(name: impl Into<String>, modified: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Directory,
            name: name.into(),
            modified: modified.into(),
            size: None,
            children: Vec::new(),
        }
    }

    /// True for directory nodes.
    pub fn is_directory(&self) -> bool {
        self.kind == ContentKind::Directory
    }
}

/// Assembles a content tree from a flat listing.
///
/// Entries whose path has no directory component belong at the current
/// level. For every directory entry at this level, the remaining entries
/// prefixed with `"{name}/"` are re-rooted (the prefix is stripped) and
/// recursed on. Input order does not matter, and the input is never
/// mutated: the partition builds new entries for each recursion step.
///
/// Deeper entries that match no directory at their level are dropped.
/// A directory with no matching contents yields empty children.
///
/// Terminates because every recursion strips a non-empty prefix from the
/// candidate paths, so the candidate set strictly shrinks.
pub fn build_tree(entries: &[RemoteEntry]) -> Vec<Content> {
    let (level, deeper): (Vec<&RemoteEntry>, Vec<&RemoteEntry>) =
        entries.iter().partition(|e| !e.path.contains('/'));

    level
        .into_iter()
        .map(|entry| {
            let mut node = Content {
                kind: entry.kind,
                name: entry.path.clone(),
                modified: entry.modified.clone(),
                size: entry.size,
                children: Vec::new(),
            };

            if entry.kind == ContentKind::Directory {
                let prefix = format!("{}/", entry.path);
                let scoped: Vec<RemoteEntry> = deeper
                    .iter()
                    .filter(|d| d.path.starts_with(&prefix))
                    .map(|d| RemoteEntry {
                        kind: d.kind,
                        path: d.path[prefix.len()..].to_string(),
                        modified: d.modified.clone(),
                        size: d.size,
                    })
                    .collect();
                node.children = build_tree(&scoped);
            }

            node
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, modified: &str) -> RemoteEntry {
        RemoteEntry {
            kind: ContentKind::File,
            path: path.to_string(),
            modified: modified.to_string(),
            size: None,
        }
    }

    fn dir(path: &str) -> RemoteEntry {
        RemoteEntry {
            kind: ContentKind::Directory,
            path: path.to_string(),
            modified: "0".to_string(),
            size: None,
        }
    }

    #[test]
    fn test_flat_files_stay_at_root() {
        let tree = build_tree(&[file("data.dat", "100"), file("foo1.txt", "200")]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "data.dat");
        assert_eq!(tree[1].name, "foo1.txt");
        assert!(tree.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_nested_entries_are_rerooted_under_their_directory() {
        let tree = build_tree(&[
            dir("test_dir1"),
            dir("test_dir1/test_subdir1"),
            file("test_dir1/test_subdir1/mini.txt", "300"),
        ]);

        assert_eq!(tree.len(), 1);
        let d1 = &tree[0];
        assert_eq!(d1.name, "test_dir1");
        assert!(d1.is_directory());

        let sub = &d1.children[0];
        assert_eq!(sub.name, "test_subdir1");
        assert_eq!(sub.children.len(), 1);
        assert_eq!(sub.children[0].name, "mini.txt");
        assert_eq!(sub.children[0].modified, "300");
    }

    #[test]
    fn test_empty_directory_yields_empty_children() {
        let tree = build_tree(&[dir("empty")]);

        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_directory());
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_unsorted_input_builds_the_same_tree() {
        let ordered = build_tree(&[
            dir("a"),
            file("a/one.txt", "1"),
            file("a/two.txt", "2"),
            file("top.txt", "3"),
        ]);
        let shuffled = build_tree(&[
            file("a/two.txt", "2"),
            file("top.txt", "3"),
            dir("a"),
            file("a/one.txt", "1"),
        ]);

        // Order within a level follows input order, so compare by lookup.
        let find = |tree: &[Content], name: &str| -> Content {
            tree.iter().find(|n| n.name == name).cloned().unwrap()
        };
        assert_eq!(find(&ordered, "a").children.len(), 2);
        assert_eq!(find(&shuffled, "a").children.len(), 2);
        assert_eq!(find(&ordered, "top.txt"), find(&shuffled, "top.txt"));
    }

    #[test]
    fn test_entry_without_matching_directory_is_dropped() {
        let tree = build_tree(&[file("orphaned/file.txt", "1"), file("kept.txt", "2")]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "kept.txt");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let entries = vec![dir("d"), file("d/f.txt", "1")];
        let before = entries.clone();
        let _ = build_tree(&entries);
        assert_eq!(entries, before);
    }
}
