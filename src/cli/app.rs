//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::report;
use crate::curate::{Curator, Policy};
use crate::storage::{Config, FsDeckStore};

#[derive(Parser)]
#[command(name = "deck-curator")]
#[command(author, version, about = "Batch curation of deck list collections")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to deck-curator.toml in the root)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Directory to scan and whether to delete
#[derive(Args, Debug)]
pub struct Target {
    /// Root directory to scan recursively
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Delete offending files (without this, only report them)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove near-duplicate decks within each directory
    Duplicates {
        #[command(flatten)]
        target: Target,

        /// Similarity at or above which a deck is a duplicate (0-1]
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Remove decks whose main section is only basic lands
    LandsOnly {
        #[command(flatten)]
        target: Target,
    },

    /// Remove decks with too few main-deck cards
    Undersized {
        #[command(flatten)]
        target: Target,

        /// Minimum main-deck card count
        #[arg(long)]
        min_cards: Option<u64>,
    },

    /// Show the effective configuration
    Config {
        /// Root directory whose configuration to show
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("deck-curator starting");

    match cli.command {
        Commands::Duplicates { target, threshold } => {
            let mut config = load_config(&target.root, cli.config.as_deref())?;
            if let Some(threshold) = threshold {
                config.duplicates.similarity_threshold = threshold;
            }
            curate(&config, cli.format, Policy::Duplicates, &target)?
        }

        Commands::LandsOnly { target } => {
            let config = load_config(&target.root, cli.config.as_deref())?;
            curate(&config, cli.format, Policy::LandsOnly, &target)?
        }

        Commands::Undersized { target, min_cards } => {
            let mut config = load_config(&target.root, cli.config.as_deref())?;
            if let Some(min_cards) = min_cards {
                config.undersized.min_main_cards = min_cards;
            }
            curate(&config, cli.format, Policy::Undersized, &target)?
        }

        Commands::Config { root } => {
            let config = load_config(&root, cli.config.as_deref())?;
            show_config(&config, cli.format, &root, cli.config.as_deref())?
        }
    }

    tracing::debug!("command completed successfully");
    Ok(())
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,deck_curator=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    Config::load(root, explicit).context("Failed to load configuration")
}

fn output_for(config: &Config, format: Option<OutputFormat>) -> Output {
    Output::new(format.unwrap_or_else(|| config.output.default_format.into()))
}

/// Runs one curation policy and prints its report
fn curate(config: &Config, format: Option<OutputFormat>, policy: Policy, target: &Target) -> Result<()> {
    config.validate()?;
    let output = output_for(config, format);

    tracing::debug!(
        policy = policy.as_str(),
        root = %target.root.display(),
        apply = target.apply,
        "running curation"
    );

    let store = FsDeckStore::new(&config.scan.extensions);
    let curator = Curator::new(store, config).apply(target.apply);

    let report = curator
        .run(policy, &target.root)
        .with_context(|| format!("Failed to scan {}", target.root.display()))?;

    report::render(&output, &report);
    Ok(())
}

/// Prints the effective configuration and where it came from
fn show_config(config: &Config, format: Option<OutputFormat>, root: &Path, explicit: Option<&Path>) -> Result<()> {
    let output = output_for(config, format);
    let source = explicit
        .map(Path::to_path_buf)
        .or_else(|| Config::locate(root));

    if output.is_json() {
        output.data(&serde_json::json!({
            "source": source.as_ref().map(|p| p.display().to_string()),
            "config": config,
        }));
    } else {
        match &source {
            Some(path) => output.line(&format!("# source: {}", path.display())),
            None => output.line("# source: built-in defaults"),
        }
        output.line(&config.to_toml()?);
    }

    Ok(())
}
