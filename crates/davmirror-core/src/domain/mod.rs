//! Domain entities for remote-share mirroring
//!
//! - [`content`] - the remote content tree and its construction from flat listings
//! - [`path_index`] - the flattened path → entry mapping and download-URL derivation
//! - [`summary`] - fetch decisions and the per-sync result record
//! - [`errors`] - the typed error taxonomy

pub mod content;
pub mod errors;
pub mod path_index;
pub mod summary;

pub use content::{build_tree, Content, ContentKind, RemoteEntry};
pub use errors::SyncError;
pub use path_index::{download_url, flatten, IndexEntry, PathIndex};
pub use summary::{Decision, FailedTransfer, FetchReason, SyncSummary};
