//! davmirror WebDAV/HTTP adapters
//!
//! Implements the core port traits against real remote endpoints:
//! - [`client::DavClient`] - PROPFIND plumbing for ownCloud-style shares
//! - [`lister::WebdavLister`] - `IRemoteLister` over the WebDAV endpoint
//! - [`lister::IndexFileLister`] - `IRemoteLister` over a stat-dump index file
//! - [`download::HttpDownloader`] - `IDownloader` streaming GET-to-file

pub mod client;
pub mod download;
pub mod lister;
pub mod propfind;

pub use client::DavClient;
pub use download::HttpDownloader;
pub use lister::{IndexFileLister, WebdavLister};
