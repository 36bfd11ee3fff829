//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and caching of robots.txt files.
//! Any failure to obtain robots.txt (transport error, non-2xx status)
//! results in a permissive policy: access fails open.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::RobotsPolicy;

use crate::crawler::{fetch_url, FetchResult};
use reqwest::Client;
use url::Url;

/// Returns the origin (`scheme://host[:port]`) of a URL
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Returns the robots.txt URL governing `url`
pub fn robots_url_for(url: &str) -> Option<String> {
    origin_of(url).map(|origin| format!("{}/robots.txt", origin))
}

/// Fetches and parses robots.txt for an origin
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `origin` - The origin, e.g. `https://www.yep.co.za`
///
/// # Returns
///
/// The parsed policy, or [`RobotsPolicy::allow_all`] when robots.txt could
/// not be retrieved.
pub async fn fetch_robots(client: &Client, origin: &str) -> RobotsPolicy {
    let Some(robots_url) = robots_url_for(origin) else {
        tracing::debug!("No origin in {}, allowing all", origin);
        return RobotsPolicy::allow_all();
    };

    match fetch_url(client, &robots_url).await {
        FetchResult::Success { body, .. } => RobotsPolicy::from_content(&body),
        FetchResult::HttpError { status_code } => {
            tracing::debug!(
                "robots.txt at {} returned HTTP {}, allowing all",
                robots_url,
                status_code
            );
            RobotsPolicy::allow_all()
        }
        FetchResult::NetworkError { error } => {
            tracing::debug!(
                "robots.txt at {} unavailable ({}), allowing all",
                robots_url,
                error
            );
            RobotsPolicy::allow_all()
        }
    }
}
