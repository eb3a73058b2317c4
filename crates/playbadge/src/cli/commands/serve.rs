//! Serve command

use clap::Args;
use console::style;
use tracing::info;

use playbadge_core::config::validation::validate_config;
use playbadge_server::{serve, shutdown_signal, AppState};

use crate::cli::Cli;

/// Run the badge HTTP service
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Interface to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Execute the serve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut config = cli.load_config()?;
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        validate_config(&config)?;

        info!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.cache.backend,
            "executing serve command"
        );

        if !cli.quiet {
            println!(
                "{} Serving badges on {}",
                style("→").blue(),
                style(format!("http://{}:{}/", config.server.host, config.server.port)).cyan()
            );
            println!("  Press Ctrl-C to stop");
        }

        let state = AppState::from_config(config)?;
        serve(state, shutdown_signal()).await?;
        Ok(())
    }
}
