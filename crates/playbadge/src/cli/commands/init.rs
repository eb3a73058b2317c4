//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use playbadge_core::config::defaults::{
    DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};
use playbadge_core::Config;

use crate::cli::Cli;

/// Create a configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write YAML instead of TOML
    #[arg(long)]
    pub yaml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");

        let yaml = self.use_yaml()?;
        let config_path = match &self.output {
            Some(path) => path.clone(),
            None => std::env::current_dir()?.join(if yaml {
                DEFAULT_CONFIG_YAML
            } else {
                DEFAULT_CONFIG_TOML
            }),
        };

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        std::fs::write(&config_path, render_config(yaml)?)?;

        if !cli.quiet {
            println!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to pick a cache backend", config_path.display());
            println!("  2. Run {} to start the service", style("playbadge serve").cyan());
        }

        Ok(())
    }

    fn use_yaml(&self) -> anyhow::Result<bool> {
        if self.yaml {
            return Ok(true);
        }
        if let Some(path) = &self.output {
            return Ok(is_yaml_path(path));
        }
        if self.yes {
            return Ok(false);
        }

        let formats = ["toml", "yaml"];
        let selection = Select::new()
            .with_prompt("Configuration format")
            .items(&formats)
            .default(0)
            .interact()?;
        Ok(formats[selection] == "yaml")
    }
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "yaml" || e == "yml")
}

/// Default configuration as TOML or YAML
fn render_config(yaml: bool) -> anyhow::Result<String> {
    if !yaml {
        return Ok(DEFAULT_CONFIG_TEMPLATE.to_string());
    }
    let body = serde_yaml::to_string(&Config::default())?;
    Ok(format!("# playbadge configuration\n\n{}", body))
}
