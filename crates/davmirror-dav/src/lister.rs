//! Remote lister implementations
//!
//! Two ways to enumerate a share, selected once at configuration time:
//!
//! - [`WebdavLister`] asks the server directly via PROPFIND.
//! - [`IndexFileLister`] fetches a pre-generated index file: the output
//!   of `find <dir> -exec stat --format="##%F##%s##%Y##%n##" '{}' \;`
//!   served over plain HTTP, for shares where WebDAV is not reachable.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use davmirror_core::domain::content::{ContentKind, RemoteEntry};
use davmirror_core::ports::IRemoteLister;

use crate::client::{DavClient, WEBDAV_ENDPOINT};
use crate::propfind::parse_multistatus;

// ============================================================================
// WebdavLister
// ============================================================================

/// Lists the share through its WebDAV endpoint
pub struct WebdavLister {
    client: DavClient,
}

impl WebdavLister {
    pub fn new(client: DavClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IRemoteLister for WebdavLister {
    async fn list(&self) -> Result<Vec<RemoteEntry>> {
        let body = self.client.propfind().await?;
        let resources = parse_multistatus(&body).context("failed to parse PROPFIND response")?;

        let mut entries = Vec::new();
        for resource in resources {
            // Hrefs are server-rooted; everything of interest lives under
            // the public-share endpoint.
            let Some(marker) = resource.href.find(WEBDAV_ENDPOINT) else {
                warn!(href = %resource.href, "skipping href outside the webdav endpoint");
                continue;
            };
            let rel = &resource.href[marker + WEBDAV_ENDPOINT.len()..];
            let rel = rel.trim_end_matches('/');
            if rel.is_empty() {
                // The share root itself.
                continue;
            }

            let kind = if resource.is_collection {
                ContentKind::Directory
            } else {
                ContentKind::File
            };
            entries.push(RemoteEntry {
                kind,
                path: rel.to_string(),
                modified: resource.modified.unwrap_or_default(),
                size: if resource.is_collection {
                    None
                } else {
                    resource.size
                },
            });
        }

        debug!(entries = entries.len(), "webdav listing complete");
        Ok(entries)
    }
}

// ============================================================================
// IndexFileLister
// ============================================================================

/// Lists the share by fetching and parsing a stat-dump index file
pub struct IndexFileLister {
    client: reqwest::Client,
    index_url: String,
}

impl IndexFileLister {
    pub fn new(index_url: impl Into<String>, insecure: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            index_url: index_url.into(),
        })
    }
}

#[async_trait::async_trait]
impl IRemoteLister for IndexFileLister {
    async fn list(&self) -> Result<Vec<RemoteEntry>> {
        debug!(url = %self.index_url, "fetching index file");
        let text = self
            .client
            .get(&self.index_url)
            .send()
            .await
            .context("index file request failed")?
            .error_for_status()
            .context("index file returned error status")?
            .text()
            .await
            .context("failed to read index file body")?;

        let entries = parse_index_dump(&text)?;
        debug!(entries = entries.len(), "index listing complete");
        Ok(entries)
    }
}

/// Parses a stat dump into flat entries.
///
/// Each non-empty line holds `##type##size##mtime##path##`. Paths are
/// taken verbatim, so the dump's leading component (the directory stat
/// was run on) becomes a top-level directory. `directory` maps to a
/// directory entry; every other stat type (`regular file`,
/// `regular empty file`, symlinks) is treated as a file.
pub fn parse_index_dump(text: &str) -> Result<Vec<RemoteEntry>> {
    let mut entries = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split("##").filter(|s| !s.is_empty()).collect();
        let [ftype, size, mtime, path] = fields.as_slice() else {
            anyhow::bail!(
                "malformed index record on line {}: {:?}",
                lineno + 1,
                line
            );
        };

        let kind = if *ftype == "directory" {
            ContentKind::Directory
        } else {
            ContentKind::File
        };
        entries.push(RemoteEntry {
            kind,
            path: (*path).to_string(),
            modified: (*mtime).to_string(),
            size: size.trim().parse().ok(),
        });
    }

    Ok(entries)
}
