//! Runtime crawl settings
//!
//! `CrawlSettings` is the single value object handed to the coordinator.
//! It is derived from the loaded [`Config`] and carries nothing the crawl
//! loop does not read.

use crate::catalog::SourceCatalog;
use crate::config::types::{CacheBackend, Config};
use std::path::PathBuf;
use std::time::Duration;

/// Hard ceiling on leads collected in one run
pub const MAX_LEADS: usize = 500;

/// Everything the crawl loop needs, resolved from configuration
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Niche to source mapping in crawl order
    pub catalog: SourceCatalog,

    /// Region substituted into search templates
    pub region: String,

    /// Descriptive `User-Agent` header value
    pub user_agent: String,

    /// Product token matched against robots.txt groups
    pub robots_agent: String,

    /// Pause after every live fetch
    pub rate_limit: Duration,

    pub cache_enabled: bool,

    pub respect_robots: bool,

    /// Yield below which a source is reported as weak
    pub min_leads_per_source: usize,

    /// Global lead cap
    pub max_leads: usize,

    pub cache_path: PathBuf,

    pub cache_backend: CacheBackend,
}

impl CrawlSettings {
    /// Builds settings from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            catalog: SourceCatalog::from_config(config),
            region: config.crawler.region.clone(),
            user_agent: config.user_agent.header_value(),
            robots_agent: config.user_agent.crawler_name.clone(),
            rate_limit: Duration::from_secs_f64(config.crawler.rate_limit_seconds),
            cache_enabled: config.crawler.cache_enabled,
            respect_robots: config.crawler.respect_robots,
            min_leads_per_source: config.crawler.min_leads_per_source,
            max_leads: MAX_LEADS,
            cache_path: PathBuf::from(&config.cache.path),
            cache_backend: config.cache.backend,
        }
    }
}

impl From<&Config> for CrawlSettings {
    fn from(config: &Config) -> Self {
        Self::from_config(config)
    }
}
