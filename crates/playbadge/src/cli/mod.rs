//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use playbadge_core::config::{load_config, load_config_or_default};
use playbadge_core::Config;
use tracing::debug;

use commands::{
    BadgeCommand, CompletionsCommand, FetchCommand, InitCommand, PlaceholdersCommand,
    ServeCommand,
};

/// playbadge - Google Play badges for shields.io
#[derive(Debug, Parser)]
#[command(name = "playbadge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (default: search from the working directory)
    #[arg(short, long, global = true, env = "PLAYBADGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the badge HTTP service
    Serve(ServeCommand),

    /// Extract and print the listing record of an app
    Fetch(FetchCommand),

    /// Print the badge JSON for an app
    Badge(BadgeCommand),

    /// List the placeholders accepted in labels and messages
    Placeholders(PlaceholdersCommand),

    /// Create a configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Serve(ref cmd) => cmd.execute(&self),
            Commands::Fetch(ref cmd) => cmd.execute(&self),
            Commands::Badge(ref cmd) => cmd.execute(&self),
            Commands::Placeholders(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the explicit config file, or search from the working directory
    pub fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(path) = &self.config {
            return Ok(load_config(path)?);
        }

        let cwd = std::env::current_dir()?;
        let (config, path) = load_config_or_default(&cwd)?;
        debug!(path = ?path, "configuration resolved");
        Ok(config)
    }
}
