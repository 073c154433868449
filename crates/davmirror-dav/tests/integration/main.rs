//! Integration tests for the WebDAV/HTTP adapters
//!
//! Run against a wiremock server; no real network access.

mod common;
mod test_download;
mod test_listing;
