//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for playbadge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener configuration
    pub server: ServerConfig,

    /// Upstream listing page configuration
    pub upstream: UpstreamConfig,

    /// Page cache configuration
    pub cache: CacheConfig,

    /// Badge endpoint configuration
    pub badge: BadgeConfig,

    /// Index page configuration
    pub site: SiteConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Upstream listing page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Listing URL prefix; the package name is appended verbatim
    pub listing_url: String,

    /// User agent sent upstream (default: `playbadge/<version>`)
    pub user_agent: Option<String>,

    /// How long intermediate HTTP caches may keep a listing page
    pub edge_cache_ttl_secs: u64,

    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://play.google.com/store/apps/details?id=".to_string(),
            user_agent: None,
            edge_cache_ttl_secs: 5 * 60 * 60,
            timeout_secs: 30,
        }
    }
}

impl UpstreamConfig {
    /// Intermediate cache lifetime as a duration
    pub fn edge_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.edge_cache_ttl_secs)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which cache backend stores fetched listing pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// Fetch every time
    None,
    /// In-process LRU
    #[default]
    Memory,
    /// One file per page on local disk
    Disk,
}

impl std::fmt::Display for CacheBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendKind::None => write!(f, "none"),
            CacheBackendKind::Memory => write!(f, "memory"),
            CacheBackendKind::Disk => write!(f, "disk"),
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend selection
    pub backend: CacheBackendKind,

    /// Lifetime of a cached page
    pub ttl_secs: u64,

    /// Maximum number of pages held by the memory backend
    pub capacity: usize,

    /// Directory used by the disk backend
    pub directory: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::Memory,
            ttl_secs: 6 * 60 * 60,
            capacity: 500,
            directory: None,
        }
    }
}

impl CacheConfig {
    /// Entry lifetime as a duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Directory for the disk backend, falling back to the user cache dir
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("playbadge")
        })
    }
}

/// Badge endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Label used when `l`/`label` is absent
    pub default_label: String,

    /// Message used when `m`/`message` is absent
    pub default_message: String,

    /// `cacheSeconds` reported to badge consumers
    pub cache_seconds: u32,

    /// Label and message templates are cut to this many characters
    pub max_text_len: usize,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            default_label: "play".to_string(),
            default_message: "$version".to_string(),
            cache_seconds: 3600,
            max_text_len: 1000,
        }
    }
}

/// Index page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Remote index template; the embedded template is used when unset
    pub template_url: Option<String>,

    /// Redirect target for `/favicon*`
    pub favicon_url: String,

    /// App id pre-filled on the index page
    pub default_appid: String,

    /// Label pre-filled on the index page
    pub default_label: String,

    /// Message pre-filled on the index page
    pub default_message: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template_url: None,
            favicon_url: "https://cvzi.github.io/play/favicon.ico".to_string(),
            default_appid: "org.mozilla.firefox".to_string(),
            default_label: "Android".to_string(),
            default_message: "$version".to_string(),
        }
    }
}
