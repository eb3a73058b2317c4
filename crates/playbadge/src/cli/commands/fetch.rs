//! Fetch command

use clap::Args;
use tracing::info;

use playbadge_core::{AppId, Field, Locale};
use playbadge_server::AppState;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Extract and print the listing record of an app
#[derive(Debug, Args)]
pub struct FetchCommand {
    /// Package name or listing URL
    pub app_id: String,

    /// Display language (hl)
    #[arg(long)]
    pub hl: Option<String>,

    /// Store country (gl)
    #[arg(long)]
    pub gl: Option<String>,
}

impl FetchCommand {
    /// Execute the fetch command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let app_id = AppId::parse(&self.app_id)?;
        let locale = Locale::new(self.hl.clone(), self.gl.clone());
        info!(package = %app_id, "executing fetch command");

        let state = AppState::from_config(cli.load_config()?)?;
        let record = state.scraper.extract(&app_id, &locale).await?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            OutputFormat::Text => {
                println!("{}", output::header(&record.name));
                for field in Field::ALL {
                    println!("{}", output::key_value(field.key(), record.get(field)));
                }
            }
        }

        Ok(())
    }
}
