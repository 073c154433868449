//! Sync command - run one incremental mirror pass
//!
//! 1. Loads and validates the configuration
//! 2. Wires the configured lister and the HTTP downloader
//! 3. Refreshes the remote index and runs the engine
//! 4. Renders the summary (counts, failures) as human text or JSON

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::commands::{build_engine, load_config};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Classify and report without transferring or saving the manifest
    #[arg(long)]
    pub dry_run: bool,

    /// Override the configured number of download workers
    #[arg(long)]
    pub workers: Option<usize>,
}

impl SyncCommand {
    pub async fn execute(&self, format: OutputFormat, config_override: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let config = load_config(config_override)?;
        let workers = self.workers.unwrap_or(config.sync.workers);
        let mut engine = build_engine(&config)?;

        if self.dry_run {
            formatter.info("Dry run - no changes will be made");
        }

        info!(workers, dry_run = self.dry_run, "starting sync");
        engine.refresh().await?;
        let summary = engine.sync(workers, self.dry_run).await?;

        if matches!(format, OutputFormat::Json) {
            formatter.print_json(&serde_json::json!({
                "dry_run": self.dry_run,
                "new": summary.new,
                "modified": summary.modified,
                "failed": summary.failed,
            }));
            return Ok(());
        }

        if summary.is_clean() {
            formatter.success("Already up to date");
        } else if self.dry_run {
            formatter.success(&format!(
                "Would transfer {} file{}",
                summary.processed(),
                if summary.processed() == 1 { "" } else { "s" }
            ));
        } else {
            formatter.success(&format!(
                "Synchronized {} file{}",
                summary.processed(),
                if summary.processed() == 1 { "" } else { "s" }
            ));
        }

        if !summary.new.is_empty() {
            formatter.info(&format!("New:      {}", summary.new.len()));
        }
        if !summary.modified.is_empty() {
            formatter.info(&format!("Modified: {}", summary.modified.len()));
        }
        if !summary.failed.is_empty() {
            formatter.error(&format!(
                "{} transfer{} failed:",
                summary.failed.len(),
                if summary.failed.len() == 1 { "" } else { "s" }
            ));
            for failure in &summary.failed {
                formatter.info(&format!("  - {}: {}", failure.path, failure.error));
            }
        }

        Ok(())
    }
}
