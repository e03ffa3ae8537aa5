use crate::config::types::{Config, CrawlConfig, PollConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_poll_config(&config.poll)?;
    Ok(())
}

/// Validates crawler demo configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.root_url.is_empty() {
        return Err(ConfigError::Validation(
            "root_url cannot be empty".to_string(),
        ));
    }

    // The root URL must at least parse; identity is still exact string
    // match during the crawl itself.
    Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root_url '{}': {}", config.root_url, e)))?;

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates poller demo configuration
fn validate_poll_config(config: &PollConfig) -> Result<(), ConfigError> {
    if config.num_workers < 1 {
        return Err(ConfigError::Validation(format!(
            "num_workers must be >= 1, got {}",
            config.num_workers
        )));
    }

    if config.poll_interval_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "poll_interval_secs must be >= 1, got {}",
            config.poll_interval_secs
        )));
    }

    if config.status_interval_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "status_interval_secs must be >= 1, got {}",
            config.status_interval_secs
        )));
    }

    for url in &config.urls {
        Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid poll URL '{}': {}", url, e)))?;
    }

    Ok(())
}
