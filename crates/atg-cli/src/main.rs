//! atg - keyword mapping and test scaffolding CLI
//!
//! Maps plain-language process steps onto existing test keywords and
//! renders a test script skeleton for the chosen framework.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{correct, corrections, keywords, map};

/// Keyword mapping and multi-framework test scaffolding
#[derive(Parser)]
#[command(name = "atg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to <config_dir>/atg/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a step file onto keywords and render a scaffold
    Map(map::MapArgs),

    /// Record a reviewer correction for a step
    Correct(correct::CorrectArgs),

    /// List stored corrections
    Corrections(corrections::CorrectionsArgs),

    /// List the keywords found in resource directories
    Keywords(keywords::KeywordsArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = atg_infrastructure::load_config(cli.config.as_deref())?;
    tracing::debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Map(args) => map::execute(args, &config)?,
        Commands::Correct(args) => correct::execute(args, &config)?,
        Commands::Corrections(args) => corrections::execute(args, &config)?,
        Commands::Keywords(args) => keywords::execute(args, &config)?,
    }

    Ok(())
}
