use serde::Deserialize;

/// Main configuration structure for Lead-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
    #[serde(default, rename = "niche")]
    pub niches: Vec<NicheEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Target region substituted into search templates (e.g. "South Africa")
    pub region: String,

    /// Delay after every live network fetch (seconds)
    #[serde(default = "default_rate_limit_seconds")]
    pub rate_limit_seconds: f64,

    /// Whether fetched pages are served from and stored in the page cache
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Whether robots.txt is consulted before fetching
    #[serde(default = "default_true")]
    pub respect_robots: bool,

    /// Per-source yield below which a warning is logged
    #[serde(default = "default_min_leads_per_source")]
    pub min_leads_per_source: usize,

    /// Number of result pages requested from every source
    #[serde(default = "default_max_pages_per_source")]
    pub max_pages_per_source: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler, also used as the robots.txt product token
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Email address for crawler-related contact
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the descriptive user agent: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Page cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Flat JSON object rewritten on every insertion
    #[default]
    Json,
    /// SQLite table with one row per URL
    Sqlite,
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: String,

    #[serde(default)]
    pub backend: CacheBackend,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            backend: CacheBackend::default(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the CSV lead export
    pub csv_path: String,

    /// Path of the markdown run summary
    pub summary_path: String,
}

/// One directory site definition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceEntry {
    pub name: String,
    pub base_url: String,
    /// Path and query template, e.g. `/search?what={query}&where={region}`
    pub search_path: String,
}

/// One target niche
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NicheEntry {
    pub key: String,

    #[serde(default)]
    pub description: String,

    /// Category id for category-keyed source templates
    #[serde(default)]
    pub category_id: Option<String>,

    /// Source names in crawl order; all sources when omitted
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

fn default_rate_limit_seconds() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_min_leads_per_source() -> usize {
    10
}

fn default_max_pages_per_source() -> u32 {
    5
}

fn default_cache_path() -> String {
    "./page_cache.json".to_string()
}
