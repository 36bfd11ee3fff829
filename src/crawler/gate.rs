//! Politeness gate
//!
//! Every page request goes through the gate, which in order:
//! 1. serves the page from the persistent cache when possible
//! 2. checks robots.txt for the page's origin (fail open)
//! 3. fetches the page with the descriptive user agent
//! 4. stores successful bodies in the cache and then waits out the
//!    rate-limit delay
//!
//! Nothing here returns an error: every failure is logged and reported as
//! a [`PageFetch`] variant without content.

use crate::config::CrawlSettings;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::robots::{fetch_robots, origin_of, RobotsCache};
use crate::storage::CacheStore;
use reqwest::Client;
use std::time::Duration;

/// Outcome of asking the gate for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    /// Served from the page cache, no network access
    Cached(String),

    /// Fetched live with a 2xx status
    Fetched(String),

    /// Blocked by robots.txt, never requested
    Disallowed,

    /// Response outside 2xx
    HttpStatus(u16),

    /// Transport failure
    Unreachable(String),
}

impl PageFetch {
    /// Page content, if any
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Cached(body) | Self::Fetched(body) => Some(body),
            _ => None,
        }
    }

    pub fn has_content(&self) -> bool {
        matches!(self, Self::Cached(_) | Self::Fetched(_))
    }
}

/// Cache lookup, robots.txt check, rate-limited fetch, cache store
pub struct PolitenessGate {
    client: Client,
    cache: Box<dyn CacheStore + Send>,
    robots: RobotsCache,
    robots_agent: String,
    rate_limit: Duration,
    cache_enabled: bool,
    respect_robots: bool,
}

impl PolitenessGate {
    /// Creates a gate over an already opened page cache
    pub fn new(
        settings: &CrawlSettings,
        cache: Box<dyn CacheStore + Send>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(&settings.user_agent)?,
            cache,
            robots: RobotsCache::new(),
            robots_agent: settings.robots_agent.clone(),
            rate_limit: settings.rate_limit,
            cache_enabled: settings.cache_enabled,
            respect_robots: settings.respect_robots,
        })
    }

    /// Requests one page
    pub async fn fetch(&mut self, url: &str) -> PageFetch {
        if self.cache_enabled {
            if let Some(body) = self.cache.get(url) {
                tracing::debug!("Cache hit: {}", url);
                return PageFetch::Cached(body);
            }
        }

        if self.respect_robots && !self.is_allowed(url).await {
            tracing::info!("URL {} disallowed by robots.txt", url);
            return PageFetch::Disallowed;
        }

        match fetch_url(&self.client, url).await {
            FetchResult::Success { body, .. } => {
                if self.cache_enabled {
                    if let Err(e) = self.cache.insert(url, &body) {
                        tracing::warn!("Failed to cache {}: {}", url, e);
                    }
                }

                if !self.rate_limit.is_zero() {
                    tokio::time::sleep(self.rate_limit).await;
                }

                PageFetch::Fetched(body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
                PageFetch::HttpStatus(status_code)
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                PageFetch::Unreachable(error)
            }
        }
    }

    /// Number of pages in the persistent cache
    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    /// Flushes the page cache; no-op when caching is disabled
    pub fn flush(&mut self) {
        if !self.cache_enabled {
            return;
        }
        if let Err(e) = self.cache.flush() {
            tracing::warn!("Failed to flush page cache: {}", e);
        }
    }

    async fn is_allowed(&mut self, url: &str) -> bool {
        let Some(origin) = origin_of(url) else {
            return true;
        };

        if let Some(policy) = self.robots.get(&origin) {
            return policy.is_allowed(url, &self.robots_agent);
        }

        tracing::debug!("Fetching robots.txt for {}", origin);
        let policy = fetch_robots(&self.client, &origin).await;
        let allowed = policy.is_allowed(url, &self.robots_agent);
        self.robots.insert(&origin, policy);
        allowed
    }
}
