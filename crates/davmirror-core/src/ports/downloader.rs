//! Download primitive port (driven/secondary port)

use std::path::Path;

/// Port trait for transferring one remote URL to a local file
///
/// A failed transfer is an ordinary `Err` value: the scheduler records
/// it against the path and carries on, so implementations should attach
/// context rather than panic. The destination's parent directory is
/// guaranteed to exist by the caller.
#[async_trait::async_trait]
pub trait IDownloader: Send + Sync {
    /// Fetches `url` into the file at `dest`, overwriting any previous
    /// content.
    async fn fetch(&self, url: &str, dest: &Path) -> anyhow::Result<()>;
}
