//! Concurrent download scheduler
//!
//! A fixed pool of worker tasks drains one shared queue of fetch
//! decisions. One coarse mutex guards every cross-worker mutation: the
//! queue itself, the in-flight manifest, the summary, and the local
//! directory check-then-create. Coarse-grained on purpose — correctness
//! over throughput; the only I/O ever done under the lock is directory
//! creation.
//!
//! A pool of size 1 behaves identically to size N modulo timing: each
//! decision is dequeued and processed exactly once, and workers exit
//! when the queue runs dry. A failed transfer is recorded against its
//! path and skipped; the pool carries on and the path is re-classified
//! as a fetch on the next pass.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use davmirror_core::domain::path_index::{IndexEntry, PathIndex};
use davmirror_core::domain::summary::{FetchReason, SyncSummary};
use davmirror_core::ports::IDownloader;

/// One queued fetch decision
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Relative path under the data directory
    pub path: String,
    /// Current index entry for the path (metadata + download URL)
    pub entry: IndexEntry,
    pub reason: FetchReason,
}

/// Everything the workers mutate, guarded by the single shared lock
struct SharedState {
    queue: VecDeque<WorkItem>,
    /// Manifest being advanced: seeded by the orchestrator with the old
    /// manifest plus the up-to-date paths, entries inserted here only on
    /// transfer success.
    manifest_next: PathIndex,
    summary: SyncSummary,
}

/// Bounded worker pool executing fetch decisions
pub struct DownloadScheduler {
    downloader: Arc<dyn IDownloader>,
    data_dir: PathBuf,
    workers: usize,
    dry_run: bool,
}

impl DownloadScheduler {
    pub fn new(
        downloader: Arc<dyn IDownloader>,
        data_dir: impl Into<PathBuf>,
        workers: usize,
        dry_run: bool,
    ) -> Self {
        Self {
            downloader,
            data_dir: data_dir.into(),
            workers,
            dry_run,
        }
    }

    /// Processes every item exactly once and returns the advanced
    /// manifest together with the pass summary.
    ///
    /// `baseline` is the manifest state to advance; failed paths keep
    /// whatever `baseline` holds for them. All workers are joined before
    /// this returns.
    pub async fn run(
        &self,
        items: Vec<WorkItem>,
        baseline: PathIndex,
    ) -> Result<(PathIndex, SyncSummary)> {
        let total = items.len();
        let state = Arc::new(Mutex::new(SharedState {
            queue: items.into(),
            manifest_next: baseline,
            summary: SyncSummary::new(),
        }));

        let pool_size = self.workers.max(1);
        debug!(total, workers = pool_size, dry_run = self.dry_run, "starting download pool");

        let mut handles = Vec::with_capacity(pool_size);
        for worker_id in 0..pool_size {
            let state = Arc::clone(&state);
            let downloader = Arc::clone(&self.downloader);
            let data_dir = self.data_dir.clone();
            let dry_run = self.dry_run;
            handles.push(tokio::spawn(async move {
                worker_loop(worker_id, state, downloader, data_dir, dry_run).await;
            }));
        }

        for handle in handles {
            handle.await.context("download worker panicked")?;
        }

        let state = Arc::try_unwrap(state)
            .map_err(|_| anyhow::anyhow!("scheduler state still shared after join"))?;
        let state = state
            .into_inner()
            .map_err(|_| anyhow::anyhow!("scheduler state lock poisoned"))?;

        Ok((state.manifest_next, state.summary))
    }
}

/// Dequeues and processes items until the queue runs dry.
async fn worker_loop(
    worker_id: usize,
    state: Arc<Mutex<SharedState>>,
    downloader: Arc<dyn IDownloader>,
    data_dir: PathBuf,
    dry_run: bool,
) {
    loop {
        let item = {
            let Ok(mut guard) = state.lock() else {
                // A sibling panicked while holding the lock; nothing
                // sane left to do.
                return;
            };
            guard.queue.pop_front()
        };
        let Some(item) = item else {
            debug!(worker_id, "queue drained, worker exiting");
            return;
        };

        process_item(&state, downloader.as_ref(), &data_dir, dry_run, item).await;
    }
}

/// Executes one fetch decision.
async fn process_item(
    state: &Mutex<SharedState>,
    downloader: &dyn IDownloader,
    data_dir: &Path,
    dry_run: bool,
    item: WorkItem,
) {
    if dry_run {
        // Preview only: full summary, no directory creation, no transfer.
        if let Ok(mut guard) = state.lock() {
            guard.summary.record(&item.path, item.reason);
        }
        return;
    }

    let dest = data_dir.join(&item.path);

    if let Some(parent) = dest.parent() {
        let created = {
            let Ok(_guard) = state.lock() else { return };
            // Check-then-create under the lock; an already existing
            // directory is success, concurrent creators never error.
            if parent.is_dir() {
                Ok(())
            } else {
                std::fs::create_dir_all(parent)
            }
        };
        if let Err(err) = created {
            warn!(path = %item.path, %err, "failed to create local directory");
            if let Ok(mut guard) = state.lock() {
                guard.summary.record(&item.path, item.reason);
                guard
                    .summary
                    .record_failure(&item.path, format!("directory creation failed: {err}"));
            }
            return;
        }
    }

    match downloader.fetch(&item.entry.url, &dest).await {
        Ok(()) => {
            debug!(path = %item.path, reason = ?item.reason, "transfer complete");
            if let Ok(mut guard) = state.lock() {
                guard.manifest_next.insert(item.path.clone(), item.entry);
                guard.summary.record(&item.path, item.reason);
            }
        }
        Err(err) => {
            // Isolated to this path: the manifest entry is not advanced,
            // so the next pass classifies it as a fetch again.
            warn!(path = %item.path, error = %format!("{err:#}"), "transfer failed");
            if let Ok(mut guard) = state.lock() {
                guard.summary.record(&item.path, item.reason);
                guard
                    .summary
                    .record_failure(&item.path, format!("{err:#}"));
            }
        }
    }
}
