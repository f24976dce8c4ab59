use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::crawler::MAX_CRAWL_DEPTH;
use crate::url::PatternList;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_start_pages(&config.start_pages)?;

    // Compiling is the only reliable check that a pattern is usable
    PatternList::new(&config.ignored_urls)?;
    PatternList::new(&config.ignored_words)?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_CRAWL_DEPTH {
        return Err(ConfigError::Validation(format!(
            "max_depth must be <= {}, got {}",
            MAX_CRAWL_DEPTH, config.max_depth
        )));
    }

    if config.parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be >= 1, got {}",
            config.parallelism
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates that every seed is an absolute http(s) URL
fn validate_start_pages(pages: &[String]) -> Result<(), ConfigError> {
    for page in pages {
        let url = Url::parse(page).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid start page '{}': {}", page, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Start page '{}' must use http or https",
                page
            )));
        }
    }

    Ok(())
}
