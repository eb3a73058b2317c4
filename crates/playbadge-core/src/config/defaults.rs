//! Default configuration values

use std::path::PathBuf;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "playbadge.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "playbadge.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".playbadge.toml",
        ".playbadge.yaml",
    ]
}

/// Per-user configuration file, e.g. `~/.config/playbadge/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("playbadge").join("config.toml"))
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# playbadge configuration

[server]
host = "127.0.0.1"
port = 8080

[upstream]
listing_url = "https://play.google.com/store/apps/details?id="
edge_cache_ttl_secs = 18000
timeout_secs = 30

[cache]
# none | memory | disk
backend = "memory"
ttl_secs = 21600
capacity = 500

[badge]
default_label = "play"
default_message = "$version"
cache_seconds = 3600
max_text_len = 1000

[site]
favicon_url = "https://cvzi.github.io/play/favicon.ico"
default_appid = "org.mozilla.firefox"
default_label = "Android"
default_message = "$version"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }
}
