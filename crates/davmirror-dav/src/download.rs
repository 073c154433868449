//! HTTP download primitive
//!
//! Streams a GET response to a local file chunk by chunk, so large
//! remote files never sit fully in memory. Failure is an ordinary error
//! value for the scheduler to record; it never aborts sibling workers.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use davmirror_core::ports::IDownloader;

/// `IDownloader` backed by reqwest
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new(insecure: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl IDownloader for HttpDownloader {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(%url, dest = %dest.display(), "downloading");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned error status"))?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("failed to create {}", dest.display()))?;

        while let Some(chunk) = response
            .chunk()
            .await
            .with_context(|| format!("stream interrupted for {url}"))?
        {
            file.write_all(&chunk)
                .await
                .with_context(|| format!("failed to write {}", dest.display()))?;
        }

        file.flush()
            .await
            .with_context(|| format!("failed to flush {}", dest.display()))?;

        Ok(())
    }
}
