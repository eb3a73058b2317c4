//! Placeholders command

use clap::Args;
use console::style;

use playbadge_core::PLACEHOLDERS;

use crate::cli::{Cli, OutputFormat};

/// List the placeholders accepted in labels and messages
#[derive(Debug, Args)]
pub struct PlaceholdersCommand {}

impl PlaceholdersCommand {
    /// Execute the placeholders command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                let rows: Vec<_> = PLACEHOLDERS
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "token": p.token,
                            "field": p.field,
                            "description": p.description,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Text => {
                let width = PLACEHOLDERS.iter().map(|p| p.token.len()).max().unwrap_or(0);
                for p in &PLACEHOLDERS {
                    println!(
                        "  {}  {}",
                        style(format!("{:width$}", p.token)).cyan(),
                        p.description
                    );
                }
                if !cli.quiet {
                    println!();
                    println!("Each placeholder is replaced once in the label and once in the message.");
                }
            }
        }
        Ok(())
    }
}
