//! WebDAV client for ownCloud-style public shares
//!
//! Wraps `reqwest::Client` with the PROPFIND plumbing the listing needs:
//! the public-share WebDAV endpoint, the `Depth` header, and the
//! pre-shared Basic token. The share token is carried verbatim; no
//! authentication negotiation happens here.

use anyhow::{Context, Result};
use reqwest::Method;
use tracing::debug;

/// Server-rooted WebDAV endpoint for public shares
pub const WEBDAV_ENDPOINT: &str = "/public.php/webdav/";

/// PROPFIND body requesting the properties the lister consumes
const PROPFIND_BODY: &str = r#"<?xml version="1.0"?><d:propfind xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns"><d:prop><d:getlastmodified/><d:getetag/><d:getcontenttype/><d:resourcetype/><oc:size/><d:getcontentlength/></d:prop></d:propfind>"#;

/// HTTP client for the share's WebDAV endpoint
pub struct DavClient {
    client: reqwest::Client,
    /// Scheme + authority of the server, no trailing slash
    base_url: String,
    share_token: Option<String>,
    depth: u32,
}

impl DavClient {
    /// Creates a client for the server hosting `root_url`.
    ///
    /// The WebDAV endpoint is server-rooted, so only the origin of
    /// `root_url` matters here.
    pub fn new(
        root_url: &str,
        share_token: Option<&str>,
        depth: u32,
        insecure: bool,
    ) -> Result<Self> {
        let parsed = url::Url::parse(root_url).context("invalid root URL")?;
        let base_url = parsed.origin().ascii_serialization();
        Self::with_base_url(base_url, share_token, depth, insecure)
    }

    /// Creates a client against an explicit base URL (useful for testing).
    pub fn with_base_url(
        base_url: impl Into<String>,
        share_token: Option<&str>,
        depth: u32,
        insecure: bool,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            share_token: share_token.map(str::to_string),
            depth,
        })
    }

    /// Issues a PROPFIND against the share endpoint and returns the raw
    /// multistatus body.
    pub async fn propfind(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, WEBDAV_ENDPOINT);
        debug!(%url, depth = self.depth, "issuing PROPFIND");

        let method = Method::from_bytes(b"PROPFIND").context("PROPFIND method")?;
        let mut request = self
            .client
            .request(method, &url)
            .header("Depth", self.depth.to_string())
            .body(PROPFIND_BODY);

        if let Some(token) = &self.share_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Basic {token}"));
        }

        let response = request
            .send()
            .await
            .context("PROPFIND request failed")?
            .error_for_status()
            .context("PROPFIND returned error status")?;

        response
            .text()
            .await
            .context("failed to read PROPFIND response body")
    }
}
