use super::{
    types::{AuthMethod, Config},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - An operator id is set, and an API key when `api_key` auth is used
/// - `none` auth only binds to a loopback host (the requester header is trusted as is)
/// - Scraper origin is http(s), timeout is non-zero
/// - Matcher threshold is in (0, 1], group size and set concurrency are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.operator_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.operator_id cannot be empty".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::ApiKey
        && config.auth.api_key.as_ref().is_none_or(|k| k.is_empty())
    {
        return Err(ConfigError::ValidationError(
            "auth.api_key must be set when method = \"api_key\"".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::None && !config.server.host.is_loopback() {
        return Err(ConfigError::ValidationError(format!(
            "auth.method = \"none\" requires a loopback server.host, got {}",
            config.server.host
        )));
    }

    if !config.scraper.base_origin.starts_with("http://")
        && !config.scraper.base_origin.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(format!(
            "scraper.base_origin must be an http(s) URL, got {:?}",
            config.scraper.base_origin
        )));
    }

    if config.scraper.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "scraper.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.sync.max_concurrent_sets == 0 {
        return Err(ConfigError::ValidationError(
            "sync.max_concurrent_sets cannot be 0".to_string(),
        ));
    }

    let threshold = config.matcher.threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "matcher.threshold must be in (0, 1], got {}",
            threshold
        )));
    }

    if config.matcher.max_group_size == 0 {
        return Err(ConfigError::ValidationError(
            "matcher.max_group_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
