//! Index classification
//!
//! Compares the freshly built path index against the manifest snapshot
//! and decides, per path, whether a transfer is needed. The rule order
//! matters and is load-bearing:
//!
//! 1. unknown to the manifest → fetch as a new file (short-circuits; a
//!    new file is never checked against local disk)
//! 2. known but absent from the local data directory → fetch
//! 3. modification token differs (exact inequality, no tolerance) → fetch
//! 4. otherwise → skip
//!
//! Remote paths that vanished from the current listing are simply not
//! classified; deletions are never propagated.

use std::path::Path;

use davmirror_core::domain::path_index::PathIndex;
use davmirror_core::domain::summary::{Decision, FetchReason};

/// Classifies every entry of `current` against `manifest`.
///
/// Local presence is probed under `data_dir`. Results follow the
/// index's lexicographic path order.
pub fn classify(
    current: &PathIndex,
    manifest: &PathIndex,
    data_dir: &Path,
) -> Vec<(String, Decision)> {
    current
        .iter()
        .map(|(path, entry)| {
            let decision = match manifest.get(path) {
                None => Decision::Fetch(FetchReason::NewFile),
                Some(prev) => {
                    if !data_dir.join(path).exists() {
                        Decision::Fetch(FetchReason::MissingLocally)
                    } else if prev.modified != entry.modified {
                        Decision::Fetch(FetchReason::ModifiedRemotely)
                    } else {
                        Decision::Skip
                    }
                }
            };
            (path.clone(), decision)
        })
        .collect()
}
