//! Manifest persistence
//!
//! The manifest is the path index of the last successfully completed
//! sync, serialized as a JSON envelope at a configured location. It is
//! loaded read-only at the start of every pass and replaced wholesale
//! after a successful non-dry-run pass, by the orchestrator thread only,
//! after all workers have joined. A missing file is "no prior state",
//! not a failure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use davmirror_core::domain::errors::SyncError;
use davmirror_core::domain::path_index::PathIndex;

const MANIFEST_VERSION: u32 = 1;

/// On-disk envelope around the persisted index
#[derive(Debug, Serialize, Deserialize)]
struct ManifestFile {
    version: u32,
    saved_at: DateTime<Utc>,
    entries: PathIndex,
}

/// Durable load/save of a [`PathIndex`] snapshot
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted snapshot.
    ///
    /// Fails with [`SyncError::ManifestMissing`] when no file exists;
    /// a corrupt or version-mismatched file is a real error.
    pub fn load(&self) -> Result<PathIndex> {
        if !self.path.exists() {
            return Err(SyncError::ManifestMissing {
                path: self.path.clone(),
            }
            .into());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read manifest at {}", self.path.display()))?;
        let file: ManifestFile = serde_json::from_str(&content)
            .with_context(|| format!("corrupt manifest at {}", self.path.display()))?;

        if file.version != MANIFEST_VERSION {
            anyhow::bail!(
                "unsupported manifest version {} at {}",
                file.version,
                self.path.display()
            );
        }

        debug!(entries = file.entries.len(), "manifest loaded");
        Ok(file.entries)
    }

    /// Loads the snapshot, mapping a missing file to an empty index.
    /// The differ then classifies everything as new.
    pub fn load_or_empty(&self) -> Result<PathIndex> {
        match self.load() {
            Ok(index) => Ok(index),
            Err(err)
                if err
                    .downcast_ref::<SyncError>()
                    .is_some_and(|e| matches!(e, SyncError::ManifestMissing { .. })) =>
            {
                info!(path = %self.path.display(), "no manifest found, treating everything as new");
                Ok(PathIndex::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Serializes `index` to the configured location, creating parent
    /// directories on demand. After a successful save, `load` on the
    /// same location reconstructs an index equal in (path → kind,
    /// modified) terms.
    pub fn save(&self, index: &PathIndex) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create manifest directory {}", parent.display())
            })?;
        }

        let file = ManifestFile {
            version: MANIFEST_VERSION,
            saved_at: Utc::now(),
            entries: index.clone(),
        };
        let json = serde_json::to_string_pretty(&file).context("failed to encode manifest")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write manifest at {}", self.path.display()))?;

        debug!(path = %self.path.display(), entries = index.len(), "manifest saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use davmirror_core::domain::content::ContentKind;
    use davmirror_core::domain::path_index::IndexEntry;

    fn entry(modified: &str) -> IndexEntry {
        IndexEntry {
            kind: ContentKind::File,
            modified: modified.to_string(),
            size: Some(1),
            url: "https://host/download?path=&files=f".to_string(),
        }
    }

    #[test]
    fn test_missing_manifest_is_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new(dir.path().join("manifest.json"));

        let err = store.load().unwrap_err();
        let sync_err = err.downcast_ref::<SyncError>().unwrap();
        assert!(matches!(sync_err, SyncError::ManifestMissing { .. }));
    }

    #[test]
    fn test_load_or_empty_maps_missing_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new(dir.path().join("manifest.json"));

        let index = store.load_or_empty().unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips_logical_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new(dir.path().join("nested").join("manifest.json"));

        let mut index = PathIndex::new();
        index.insert("a/b.dat".into(), entry("1490000001"));
        index.insert("c.txt".into(), entry("1490000002"));
        store.save(&index).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("a/b.dat").unwrap().modified, "1490000001");
        assert_eq!(loaded.get("a/b.dat").unwrap().kind, ContentKind::File);
        assert_eq!(loaded.get("c.txt").unwrap().modified, "1490000002");
    }

    #[test]
    fn test_save_overwrites_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new(dir.path().join("manifest.json"));

        let mut first = PathIndex::new();
        first.insert("old.txt".into(), entry("1"));
        store.save(&first).unwrap();

        let mut second = PathIndex::new();
        second.insert("new.txt".into(), entry("2"));
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.get("old.txt").is_none());
        assert_eq!(loaded.get("new.txt").unwrap().modified, "2");
    }

    #[test]
    fn test_corrupt_manifest_is_a_real_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = ManifestStore::new(&path);
        assert!(store.load().is_err());
        assert!(store.load_or_empty().is_err());
    }
}
