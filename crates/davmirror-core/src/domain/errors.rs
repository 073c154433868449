//! Domain error types
//!
//! The taxonomy separates fatal pre-flight failures (configuration,
//! listing) from per-path conditions that a sync pass absorbs
//! (missing manifest, individual transfer failures).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a mirror/sync operation
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing or invalid required configuration; fatal before any
    /// network activity
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The remote lister failed; no partial index is ever used
    #[error("remote listing unavailable: {0}")]
    ListingUnavailable(String),

    /// No manifest file exists at the configured location. Callers treat
    /// this as "no prior state" (everything is new), not as a failure.
    #[error("manifest not found at {path}")]
    ManifestMissing {
        /// The location that was probed
        path: PathBuf,
    },

    /// A single transfer failed; recorded per path, never aborts the run
    #[error("transfer failed for {path}: {reason}")]
    TransferFailure {
        /// Relative path of the entry whose transfer failed
        path: String,
        /// Adapter-reported failure description
        reason: String,
    },
}

impl SyncError {
    /// True when the error is fatal for the whole sync invocation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Configuration(_) | SyncError::ListingUnavailable(_)
        )
    }
}
