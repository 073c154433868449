//! Remote lister port (driven/secondary port)
//!
//! A remote lister enumerates a share as a flat sequence of
//! [`RemoteEntry`] records. Two implementations ship in the adapter
//! crate — a WebDAV PROPFIND lister and an index-file lister — and the
//! seam is where a crawling lister would plug in. Which lister to use is
//! decided once, at configuration time, not per call.
//!
//! Uses `anyhow::Result` because errors at port boundaries are
//! adapter-specific; the engine treats any listing failure as fatal for
//! the pass (no partial index is ever used).

use crate::domain::content::RemoteEntry;

/// Port trait for enumerating the remote share
#[async_trait::async_trait]
pub trait IRemoteLister: Send + Sync {
    /// Returns the full flat listing of the share.
    ///
    /// Paths are slash-separated and relative to the share root.
    /// Directory entries may appear in any order relative to their
    /// contents; the tree builder does not assume sorted input.
    async fn list(&self) -> anyhow::Result<Vec<RemoteEntry>>;
}
