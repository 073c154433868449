//! davmirror CLI - mirror a remote share into a local directory
//!
//! Provides commands for:
//! - Running an incremental sync (with dry-run preview)
//! - Listing mirrored paths and their download URLs
//! - Exporting an offline fetch script
//! - Inspecting and bootstrapping the configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    config::ConfigCommand,
    ls::{LsCommand, UrlsCommand},
    script::ScriptCommand,
    sync::SyncCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "davmirror", version, about = "Mirror a WebDAV share into a local directory")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synchronize the local mirror with the remote share
    Sync(SyncCommand),
    /// List all mirrored relative paths
    Ls(LsCommand),
    /// List all paths with their download URLs
    Urls(UrlsCommand),
    /// Export an offline fetch script
    Script(ScriptCommand),
    /// View and bootstrap configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(format, cli.config.as_deref()).await,
        Commands::Ls(cmd) => cmd.execute(format, cli.config.as_deref()).await,
        Commands::Urls(cmd) => cmd.execute(format, cli.config.as_deref()).await,
        Commands::Script(cmd) => cmd.execute(format, cli.config.as_deref()).await,
        Commands::Config(cmd) => cmd.execute(format, cli.config.as_deref()).await,
    }
}
