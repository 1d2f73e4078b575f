//! despill - spill suppression tool
//!
//! Inspects how a despill configuration resolves and what it does to
//! individual pixels.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{apply::ApplyArgs, config::ConfigArgs, resolve::ResolveArgs};

#[derive(Parser)]
#[command(name = "despill")]
#[command(author, version, about = "Green/blue screen spill suppression")]
#[command(long_about = "
Resolves despill configurations and runs sample pixels through the pipeline.

Examples:
  despill config > green.yaml                 # Default configuration
  despill resolve -c green.yaml               # Selection, hue shift, pass mode
  despill apply -c green.yaml 0.2,0.8,0.2     # Despill one pixel
  despill apply -c green.yaml 0.2,0.8,0.2 0.1,0.6,0.3 --limit 0.5
  despill apply 0.2,0.8,0.2 --live 0,1,0 --respill 0.18,0.18,0.18
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration as YAML
    Config(ConfigArgs),

    /// Show how a configuration resolves
    #[command(visible_alias = "r")]
    Resolve(ResolveArgs),

    /// Run pixels through the pipeline
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Config(args) => commands::config::run(args, cli.verbose),
        Commands::Resolve(args) => commands::resolve::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
    }
}
