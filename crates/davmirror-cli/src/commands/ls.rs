//! Listing commands: mirrored paths and their download URLs

use anyhow::Result;
use clap::Args;

use crate::commands::{build_engine, load_config};
use crate::output::{get_formatter, OutputFormat};

/// List all mirrored relative paths, sorted
#[derive(Debug, Args)]
pub struct LsCommand {}

impl LsCommand {
    pub async fn execute(&self, format: OutputFormat, config_override: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let config = load_config(config_override)?;
        let mut engine = build_engine(&config)?;
        engine.refresh().await?;

        let paths = engine.list_paths();
        if matches!(format, OutputFormat::Json) {
            formatter.print_json(&serde_json::json!({ "paths": paths }));
        } else {
            for path in &paths {
                formatter.plain(path);
            }
        }
        Ok(())
    }
}

/// List all paths with their download URLs, sorted by path
#[derive(Debug, Args)]
pub struct UrlsCommand {}

impl UrlsCommand {
    pub async fn execute(&self, format: OutputFormat, config_override: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let config = load_config(config_override)?;
        let mut engine = build_engine(&config)?;
        engine.refresh().await?;

        let urls = engine.list_urls();
        if matches!(format, OutputFormat::Json) {
            let records: Vec<serde_json::Value> = urls
                .iter()
                .map(|(path, url)| serde_json::json!({ "path": path, "url": url }))
                .collect();
            formatter.print_json(&serde_json::json!({ "urls": records }));
        } else {
            for (path, url) in &urls {
                formatter.plain(&format!("{path}\t{url}"));
            }
        }
        Ok(())
    }
}
