//! Fetch decisions and the sync result record

use serde::{Deserialize, Serialize};

/// Why a path must be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchReason {
    /// Path is absent from the manifest
    NewFile,
    /// Path is known to the manifest but the local file is gone
    MissingLocally,
    /// Remote modification token differs from the manifest's
    ModifiedRemotely,
}

/// Outcome of classifying one path against the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Path is up to date; nothing to do
    Skip,
    /// Path must be transferred
    Fetch(FetchReason),
}

/// One recorded transfer failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTransfer {
    pub path: String,
    pub error: String,
}

/// Result of one sync pass
///
/// `new` and `modified` list the processed fetch paths in completion
/// order — workers finish in no particular sequence, so consumers must
/// compare as sets. `failed` is the per-path failure log; a failed path
/// still appears in its bucket but its manifest entry is not advanced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSummary {
    pub new: Vec<String>,
    pub modified: Vec<String>,
    pub failed: Vec<FailedTransfer>,
}

impl SyncSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a processed path to the bucket its fetch reason maps to.
    ///
    /// `NewFile` lands in `new`; `MissingLocally` and `ModifiedRemotely`
    /// are both re-downloads of a known path and land in `modified`.
    pub fn record(&mut self, path: &str, reason: FetchReason) {
        match reason {
            FetchReason::NewFile => self.new.push(path.to_string()),
            FetchReason::MissingLocally | FetchReason::ModifiedRemotely => {
                self.modified.push(path.to_string());
            }
        }
    }

    /// Records a transfer failure for `path`.
    pub fn record_failure(&mut self, path: &str, error: impl Into<String>) {
        self.failed.push(FailedTransfer {
            path: path.to_string(),
            error: error.into(),
        });
    }

    /// Total number of processed fetch decisions.
    pub fn processed(&self) -> usize {
        self.new.len() + self.modified.len()
    }

    /// True when the pass had nothing to transfer.
    pub fn is_clean(&self) -> bool {
        self.new.is_empty() && self.modified.is_empty()
    }
}
