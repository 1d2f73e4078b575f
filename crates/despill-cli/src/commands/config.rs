//! Config command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::load_config;

/// Arguments for the `config` command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Normalize this config instead of printing the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the config command.
pub fn run(args: ConfigArgs, verbose: u8) -> Result<()> {
    let config = load_config(args.config.as_deref())?.normalized();
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, yaml)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if verbose > 0 {
                println!("Wrote {}", path.display());
            }
            info!(path = %path.display(), "config written");
        }
        None => print!("{yaml}"),
    }
    Ok(())
}
