use crate::config::types::{
    Config, CrawlerConfig, NicheEntry, OutputConfig, SourceEntry, UserAgentConfig,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Longest pause allowed between live fetches
pub const MAX_RATE_LIMIT_SECONDS: f64 = 3600.0;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_sources(&config.sources)?;
    validate_niches(&config.niches, &config.sources)?;

    if config.cache.path.is_empty() {
        return Err(ConfigError::Validation(
            "cache path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.region.trim().is_empty() {
        return Err(ConfigError::Validation("region cannot be empty".to_string()));
    }

    if !config.rate_limit_seconds.is_finite()
        || !(0.0..=MAX_RATE_LIMIT_SECONDS).contains(&config.rate_limit_seconds)
    {
        return Err(ConfigError::Validation(format!(
            "rate_limit_seconds must be between 0 and {}, got {}",
            MAX_RATE_LIMIT_SECONDS, config.rate_limit_seconds
        )));
    }

    if config.max_pages_per_source < 1 || config.max_pages_per_source > 100 {
        return Err(ConfigError::Validation(format!(
            "max_pages_per_source must be between 1 and 100, got {}",
            config.max_pages_per_source
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

    // The name doubles as the robots.txt product token
    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates source definitions
fn validate_sources(sources: &[SourceEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for source in sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(source.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name '{}'",
                source.name
            )));
        }

        let url = Url::parse(&source.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid base_url '{}' for source '{}': {}",
                source.base_url, source.name, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "base_url '{}' must use http or https",
                source.base_url
            )));
        }

        if !source.search_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "search_path for source '{}' must start with '/'",
                source.name
            )));
        }

        if !source.search_path.contains("{query}") && !source.search_path.contains("{category}")
        {
            return Err(ConfigError::Validation(format!(
                "search_path for source '{}' must contain {{query}} or {{category}}",
                source.name
            )));
        }
    }

    Ok(())
}

/// Validates niche entries and their source references
fn validate_niches(niches: &[NicheEntry], sources: &[SourceEntry]) -> Result<(), ConfigError> {
    let known: HashSet<&str> = sources.iter().map(|s| s.name.as_str()).collect();
    let mut seen = HashSet::new();

    for niche in niches {
        if niche.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "niche key cannot be empty".to_string(),
            ));
        }

        if !seen.insert(niche.key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate niche key '{}'",
                niche.key
            )));
        }

        if let Some(names) = &niche.sources {
            for name in names {
                if !known.contains(name.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "niche '{}' references unknown source '{}'",
                        niche.key, name
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
