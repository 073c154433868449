//! Sync orchestrator
//!
//! The [`SyncEngine`] ties the pipeline together: refresh the remote
//! index through the configured lister, classify it against the
//! manifest, fan the fetch decisions out to the scheduler, and persist
//! the advanced manifest when the pass was not a dry run.
//!
//! ## Ownership
//!
//! The engine owns the manifest store and the current path index for the
//! duration of a pass. Workers receive read access to individual index
//! entries and merge their results back under the scheduler's shared
//! lock; the manifest file itself is written exactly once, here, after
//! all workers have joined.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use davmirror_core::config::Config;
use davmirror_core::domain::content::build_tree;
use davmirror_core::domain::errors::SyncError;
use davmirror_core::domain::path_index::PathIndex;
use davmirror_core::domain::summary::{Decision, SyncSummary};
use davmirror_core::ports::{IDownloader, IRemoteLister};

use crate::differ::classify;
use crate::manifest::ManifestStore;
use crate::scheduler::{DownloadScheduler, WorkItem};
use crate::script;

/// Orchestrates one remote share mirror
pub struct SyncEngine {
    lister: Arc<dyn IRemoteLister>,
    downloader: Arc<dyn IDownloader>,
    manifest: ManifestStore,
    root_url: String,
    data_dir: PathBuf,
    include: Vec<Regex>,
    /// Current remote index; empty until [`refresh`](Self::refresh) runs
    index: PathIndex,
}

impl SyncEngine {
    /// Builds an engine from the configuration and the two adapters.
    ///
    /// Fails with a configuration error when an include pattern does not
    /// compile — before any network activity.
    pub fn new(
        lister: Arc<dyn IRemoteLister>,
        downloader: Arc<dyn IDownloader>,
        config: &Config,
    ) -> Result<Self, SyncError> {
        let include = config.include_patterns()?;
        Ok(Self {
            lister,
            downloader,
            manifest: ManifestStore::new(config.local.manifest_path.clone()),
            root_url: config.remote.root_url.clone(),
            data_dir: config.local.data_dir.clone(),
            include,
            index: PathIndex::new(),
        })
    }

    /// Fetches the remote listing and rebuilds the current index.
    ///
    /// A lister failure is fatal for the pass: no partial index is ever
    /// used. Include patterns are applied here, before any differencing.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<()> {
        let entries = self
            .lister
            .list()
            .await
            .map_err(|e| SyncError::ListingUnavailable(format!("{e:#}")))?;

        let tree = build_tree(&entries);
        let mut index = PathIndex::from_tree(&tree, &self.root_url);

        if !self.include.is_empty() {
            let patterns = &self.include;
            index.retain(|path| patterns.iter().any(|re| re.is_match(path)));
        }

        info!(
            listed = entries.len(),
            indexed = index.len(),
            "remote index refreshed"
        );
        self.index = index;
        Ok(())
    }

    /// All indexed relative paths, lexicographically sorted.
    pub fn list_paths(&self) -> Vec<String> {
        self.index.paths()
    }

    /// All `(path, download_url)` pairs, sorted by path.
    pub fn list_urls(&self) -> Vec<(String, String)> {
        self.index
            .iter()
            .map(|(path, entry)| (path.clone(), entry.url.clone()))
            .collect()
    }

    /// Runs one sync pass over the current index.
    ///
    /// Loads the manifest (a missing one means everything is new),
    /// classifies, schedules the fetches across `workers` tasks, and —
    /// only when `dry_run` is false — persists the advanced index as the
    /// new manifest. Individual transfer failures are reported in the
    /// summary, never as an error from this method.
    #[tracing::instrument(skip(self))]
    pub async fn sync(&self, workers: usize, dry_run: bool) -> Result<SyncSummary> {
        let manifest = self.manifest.load_or_empty()?;
        let decisions = classify(&self.index, &manifest, &self.data_dir);

        // The baseline the scheduler advances: previous manifest state,
        // plus the current entries of every up-to-date path. Fetched
        // paths join it only on transfer success.
        let mut baseline = manifest;
        let mut items = Vec::new();
        for (path, decision) in decisions {
            match decision {
                Decision::Skip => {
                    if let Some(entry) = self.index.get(&path) {
                        baseline.insert(path, entry.clone());
                    }
                }
                Decision::Fetch(reason) => {
                    if let Some(entry) = self.index.get(&path) {
                        items.push(WorkItem {
                            path,
                            entry: entry.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        info!(
            total = self.index.len(),
            fetches = items.len(),
            dry_run,
            "classified current index against manifest"
        );

        let scheduler = DownloadScheduler::new(
            Arc::clone(&self.downloader),
            self.data_dir.clone(),
            workers,
            dry_run,
        );
        let (next_manifest, summary) = scheduler.run(items, baseline).await?;

        if !dry_run {
            self.manifest
                .save(&next_manifest)
                .context("failed to persist manifest")?;
        }

        info!(
            new = summary.new.len(),
            modified = summary.modified.len(),
            failed = summary.failed.len(),
            "sync pass finished"
        );
        Ok(summary)
    }

    /// Renders the offline fetch script for the current index.
    pub fn render_script(&self) -> String {
        script::render(&self.index)
    }

    /// Writes the fetch script to `path`.
    pub fn write_script(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_script())
            .with_context(|| format!("failed to write script to {}", path.display()))
    }
}
