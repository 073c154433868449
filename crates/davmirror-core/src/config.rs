//! Configuration module for davmirror.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults. Validation reports every
//! problem it finds; a non-empty result is a fatal configuration error and
//! aborts before any network activity.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::SyncError;

/// Which lister implementation enumerates the remote share.
///
/// Selected once at configuration time; the engine never switches
/// listers mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListerKind {
    /// WebDAV PROPFIND against the share endpoint
    #[default]
    Webdav,
    /// HTTP fetch of a stat-dump index file
    Index,
}

/// Top-level configuration for davmirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    pub local: LocalConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Remote share settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Root URL of the shared folder (e.g. `https://host/index.php/s/abc`).
    pub root_url: String,
    /// Pre-shared Basic authorization token for the public share.
    pub share_token: Option<String>,
    /// Which lister enumerates the share.
    pub lister: ListerKind,
    /// URL of the stat-dump index file; required when `lister = index`.
    pub index_url: Option<String>,
    /// PROPFIND `Depth` header value.
    pub propfind_depth: u32,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory the share is mirrored into.
    pub data_dir: PathBuf,
    /// Location of the persisted manifest snapshot.
    pub manifest_path: PathBuf,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Number of concurrent download workers.
    pub workers: usize,
    /// Include-regex patterns applied to relative paths before
    /// differencing. Empty means "include everything"; otherwise a path
    /// is kept only when at least one pattern matches.
    pub include: Vec<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/davmirror/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("davmirror")
            .join("config.yaml")
    }

    /// Compiles the include patterns, failing with a configuration error
    /// on the first invalid one.
    pub fn include_patterns(&self) -> Result<Vec<Regex>, SyncError> {
        self.sync
            .include
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    SyncError::Configuration(format!("invalid include pattern '{pattern}': {e}"))
                })
            })
            .collect()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            root_url: String::new(),
            share_token: None,
            lister: ListerKind::Webdav,
            index_url: None,
            propfind_depth: 3,
            insecure: false,
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("davmirror");
        Self {
            manifest_path: data_dir.join("manifest.json"),
            data_dir: data_dir.join("data"),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            include: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.workers"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- remote ---
        if self.remote.root_url.is_empty() {
            errors.push(ValidationError {
                field: "remote.root_url".into(),
                message: "must be set".into(),
            });
        } else {
            match url::Url::parse(&self.remote.root_url) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                Ok(parsed) => errors.push(ValidationError {
                    field: "remote.root_url".into(),
                    message: format!("unsupported scheme '{}'", parsed.scheme()),
                }),
                Err(e) => errors.push(ValidationError {
                    field: "remote.root_url".into(),
                    message: format!("not a valid URL: {e}"),
                }),
            }
        }
        if self.remote.lister == ListerKind::Index && self.remote.index_url.is_none() {
            errors.push(ValidationError {
                field: "remote.index_url".into(),
                message: "required when remote.lister is 'index'".into(),
            });
        }
        if self.remote.propfind_depth == 0 {
            errors.push(ValidationError {
                field: "remote.propfind_depth".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- sync ---
        if self.sync.workers == 0 {
            errors.push(ValidationError {
                field: "sync.workers".into(),
                message: "must be greater than 0".into(),
            });
        }
        for pattern in &self.sync.include {
            if let Err(e) = Regex::new(pattern) {
                errors.push(ValidationError {
                    field: "sync.include".into(),
                    message: format!("invalid pattern '{pattern}': {e}"),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.remote.root_url = "https://owncloud.example.org/index.php/s/token".into();
        config
    }

    #[test]
    fn test_default_config_fails_on_missing_root_url() {
        let errors = Config::default().validate();
        assert!(errors.iter().any(|e| e.field == "remote.root_url"));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_empty());
    }

    #[test]
    fn test_index_lister_requires_index_url() {
        let mut config = valid_config();
        config.remote.lister = ListerKind::Index;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "remote.index_url"));

        config.remote.index_url = Some("https://host/fs_info.txt".into());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = valid_config();
        config.sync.workers = 0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "sync.workers"));
    }

    #[test]
    fn test_bad_include_pattern_reported() {
        let mut config = valid_config();
        config.sync.include = vec!["data/.*\\.fits".into(), "([unclosed".into()];
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "sync.include"));
        assert!(config.include_patterns().is_err());
    }

    #[test]
    fn test_include_patterns_compile() {
        let mut config = valid_config();
        config.sync.include = vec!["^test_dir1/".into()];
        let patterns = config.include_patterns().unwrap();
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].is_match("test_dir1/test_subdir1/mini.txt"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = valid_config();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.remote.root_url, config.remote.root_url);
        assert_eq!(back.remote.lister, ListerKind::Webdav);
        assert_eq!(back.sync.workers, 10);
    }

    #[test]
    fn test_load_reads_yaml_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, serde_yaml::to_string(&valid_config()).unwrap()).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(
            loaded.remote.root_url,
            "https://owncloud.example.org/index.php/s/token"
        );
    }

    #[test]
    fn test_load_or_default_falls_back_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.yaml"));
        assert!(config.remote.root_url.is_empty());
        assert_eq!(config.sync.workers, 10);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.logging.level = "chatty".into();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "logging.level"));
    }
}
