//! Script command - export the offline fetch script

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::{build_engine, load_config};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct ScriptCommand {
    /// Where to write the script; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ScriptCommand {
    pub async fn execute(&self, format: OutputFormat, config_override: Option<&str>) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));

        let config = load_config(config_override)?;
        let mut engine = build_engine(&config)?;
        engine.refresh().await?;

        match &self.output {
            Some(path) => {
                engine.write_script(path)?;
                formatter.success(&format!(
                    "Wrote fetch script for {} file{} to {}",
                    engine.list_paths().len(),
                    if engine.list_paths().len() == 1 { "" } else { "s" },
                    path.display()
                ));
            }
            None => {
                if matches!(format, OutputFormat::Json) {
                    formatter.print_json(&serde_json::json!({
                        "script": engine.render_script(),
                    }));
                } else {
                    print!("{}", engine.render_script());
                }
            }
        }
        Ok(())
    }
}
