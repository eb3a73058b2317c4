//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{CacheBackendKind, Config};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_server(config)?;
    validate_upstream(config)?;
    validate_cache(config)?;
    validate_badge(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::PlayBadgeError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

fn validate_server(config: &Config) -> Result<()> {
    if config.server.host.trim().is_empty() {
        return Err(invalid("server.host", "host cannot be empty"));
    }
    Ok(())
}

fn validate_upstream(config: &Config) -> Result<()> {
    let listing_url = &config.upstream.listing_url;
    if !(listing_url.starts_with("http://") || listing_url.starts_with("https://")) {
        return Err(invalid("upstream.listing_url", "must be an http(s) URL"));
    }

    if config.upstream.timeout_secs == 0 {
        return Err(invalid("upstream.timeout_secs", "must be greater than zero"));
    }

    Ok(())
}

fn validate_cache(config: &Config) -> Result<()> {
    if config.cache.backend == CacheBackendKind::None {
        return Ok(());
    }

    if config.cache.ttl_secs == 0 {
        return Err(invalid("cache.ttl_secs", "must be greater than zero"));
    }

    if config.cache.backend == CacheBackendKind::Memory && config.cache.capacity == 0 {
        return Err(invalid(
            "cache.capacity",
            "memory cache needs room for at least one page",
        ));
    }

    Ok(())
}

fn validate_badge(config: &Config) -> Result<()> {
    if config.badge.max_text_len == 0 {
        return Err(invalid("badge.max_text_len", "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.server.host = " ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_listing_url_scheme() {
        let mut config = Config::default();
        config.upstream.listing_url = "ftp://example.com/?id=".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("upstream.listing_url"));
    }

    #[test]
    fn test_validate_zero_capacity_only_matters_for_memory() {
        let mut config = Config::default();
        config.cache.capacity = 0;
        assert!(validate_config(&config).is_err());

        config.cache.backend = CacheBackendKind::Disk;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_ttl_allowed_without_cache() {
        let mut config = Config::default();
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_err());

        config.cache.backend = CacheBackendKind::None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_max_text_len() {
        let mut config = Config::default();
        config.badge.max_text_len = 0;
        assert!(validate_config(&config).is_err());
    }
}
