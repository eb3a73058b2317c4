//! Listing page download over HTTP(S)

use std::time::Duration;

use playbadge_core::config::UpstreamConfig;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::traits::PageSource;

const USER_AGENT: &str = concat!("playbadge/", env!("CARGO_PKG_VERSION"));

/// [`PageSource`] backed by reqwest.
///
/// Every request carries `Cache-Control: max-age=<edge ttl>` so shared
/// HTTP caches in front of the upstream may answer from their copy.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    edge_cache_ttl: Duration,
}

impl HttpSource {
    /// Create a client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            edge_cache_ttl: config.edge_cache_ttl(),
        })
    }
}

#[async_trait::async_trait]
impl PageSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching upstream page");

        let response = self
            .client
            .get(url)
            .header(
                CACHE_CONTROL,
                format!("max-age={}", self.edge_cache_ttl.as_secs()),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.to_string(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        debug!(url, bytes = text.len(), "fetched upstream page");
        Ok(text)
    }
}
