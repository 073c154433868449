//! CLI subcommands
//!
//! Each command wires the adapters the configuration asks for, drives
//! the engine, and renders results through the output formatter.

pub mod config;
pub mod ls;
pub mod script;
pub mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use davmirror_core::config::{Config, ListerKind};
use davmirror_core::domain::errors::SyncError;
use davmirror_core::ports::{IDownloader, IRemoteLister};
use davmirror_dav::{DavClient, HttpDownloader, IndexFileLister, WebdavLister};
use davmirror_sync::SyncEngine;

/// Resolves the configuration file location: the `--config` override or
/// the platform default.
pub(crate) fn config_path(override_path: Option<&str>) -> PathBuf {
    override_path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path)
}

/// Loads and validates the configuration; any validation finding is a
/// fatal configuration error, raised before any network activity.
pub(crate) fn load_config(override_path: Option<&str>) -> Result<Config> {
    let path = config_path(override_path);
    let config = Config::load(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;

    let errors = config.validate();
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SyncError::Configuration(joined).into());
    }

    Ok(config)
}

/// Builds the engine with the lister the configuration selects.
pub(crate) fn build_engine(config: &Config) -> Result<SyncEngine> {
    let lister: Arc<dyn IRemoteLister> = match config.remote.lister {
        ListerKind::Webdav => {
            let client = DavClient::new(
                &config.remote.root_url,
                config.remote.share_token.as_deref(),
                config.remote.propfind_depth,
                config.remote.insecure,
            )?;
            Arc::new(WebdavLister::new(client))
        }
        ListerKind::Index => {
            let index_url = config.remote.index_url.clone().ok_or_else(|| {
                SyncError::Configuration("remote.index_url is required for the index lister".into())
            })?;
            Arc::new(IndexFileLister::new(index_url, config.remote.insecure)?)
        }
    };

    let downloader: Arc<dyn IDownloader> = Arc::new(HttpDownloader::new(config.remote.insecure)?);

    Ok(SyncEngine::new(lister, downloader, config)?)
}
