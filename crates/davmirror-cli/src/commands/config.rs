//! Config command - inspect and bootstrap the configuration file

use anyhow::{Context, Result};
use clap::Subcommand;

use davmirror_core::config::Config;

use crate::commands::config_path;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Write a default configuration file if none exists
    Init,
}

impl ConfigCommand {
    pub async fn execute(&self, format: OutputFormat, config_override: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let path = config_path(config_override);

        match self {
            ConfigCommand::Show => {
                let config = Config::load_or_default(&path);
                if matches!(format, OutputFormat::Json) {
                    formatter.print_json(&serde_json::to_value(&config)?);
                } else {
                    let yaml = serde_yaml::to_string(&config)?;
                    formatter.plain(yaml.trim_end());
                }
            }
            ConfigCommand::Path => {
                formatter.plain(&path.display().to_string());
            }
            ConfigCommand::Init => {
                if path.exists() {
                    formatter.error(&format!("{} already exists", path.display()));
                    return Ok(());
                }
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create config directory {}", parent.display())
                    })?;
                }
                let yaml = serde_yaml::to_string(&Config::default())?;
                std::fs::write(&path, yaml)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                formatter.success(&format!("Wrote default configuration to {}", path.display()));
                formatter.info("Set remote.root_url before the first sync.");
            }
        }
        Ok(())
    }
}
