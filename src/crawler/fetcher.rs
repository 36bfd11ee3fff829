//! HTTP fetcher implementation
//!
//! One GET per call, no retries. Retrying is a crawl-level decision and the
//! crawl never makes it: a failed page is simply skipped.

use reqwest::Client;
use std::time::Duration;

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// 2xx response
    Success {
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Response outside 2xx
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (connection refused, DNS, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Builds an HTTP client with the descriptive user agent and fixed timeout
///
/// # Example
///
/// ```no_run
/// use lead_harvest::crawler::build_http_client;
///
/// let client = build_http_client("LeadHarvest/1.0 (+https://example.com/about; leads@example.com)").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues one GET request
///
/// Status codes outside 2xx are returned as [`FetchResult::HttpError`],
/// never as an error; transport failures become
/// [`FetchResult::NetworkError`].
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}
