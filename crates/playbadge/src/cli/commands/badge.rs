//! Badge command

use clap::Args;
use tracing::info;

use playbadge_server::handlers::badge;
use playbadge_server::query::QueryParams;
use playbadge_server::AppState;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Print the badge JSON for an app, exactly as `/play` would return it
#[derive(Debug, Args)]
pub struct BadgeCommand {
    /// Package name or listing URL
    pub app_id: String,

    /// Label template
    #[arg(short, long)]
    pub label: Option<String>,

    /// Message template
    #[arg(short, long)]
    pub message: Option<String>,

    /// Display language (hl)
    #[arg(long)]
    pub hl: Option<String>,

    /// Store country (gl)
    #[arg(long)]
    pub gl: Option<String>,
}

impl BadgeCommand {
    /// Execute the badge command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(app_id = %self.app_id, "executing badge command");
        let state = AppState::from_config(cli.load_config()?)?;

        let response = badge(&state, &self.query()).await;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
            OutputFormat::Text if !response.is_error => {
                println!("{}", output::key_value("label", &response.label));
                println!("{}", output::key_value("message", &response.message));
            }
            OutputFormat::Text => {}
        }

        if response.is_error {
            anyhow::bail!("badge request failed: {}", response.message);
        }
        Ok(())
    }

    /// The `/play` query equivalent to the arguments
    fn query(&self) -> QueryParams {
        let optional = [
            ("l", &self.label),
            ("m", &self.message),
            ("hl", &self.hl),
            ("gl", &self.gl),
        ];
        QueryParams::from_pairs(
            std::iter::once(("i", self.app_id.clone())).chain(
                optional
                    .into_iter()
                    .filter_map(|(key, value)| value.clone().map(|v| (key, v))),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_arguments() {
        let cmd = BadgeCommand {
            app_id: "org.example.app".to_string(),
            label: None,
            message: Some("$version".to_string()),
            hl: Some("de".to_string()),
            gl: None,
        };
        let query = cmd.query();
        assert_eq!(query.first_of(&["i", "id"]), Some("org.example.app"));
        assert_eq!(query.first_of(&["l", "label"]), None);
        assert_eq!(query.get("m"), Some("$version"));
        assert_eq!(query.get("hl"), Some("de"));
        assert_eq!(query.get("gl"), None);
    }
}
