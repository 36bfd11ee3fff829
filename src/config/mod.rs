//! Configuration module for Lead-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and turning them into the [`CrawlSettings`] the crawler runs on.
//!
//! # Example
//!
//! ```no_run
//! use lead_harvest::config::{load_config, CrawlSettings};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! let settings = CrawlSettings::from_config(&config);
//! println!("Crawling {} with a {:?} delay", settings.region, settings.rate_limit);
//! ```

mod parser;
mod settings;
mod types;
mod validation;

pub use types::{
    CacheBackend, CacheConfig, Config, CrawlerConfig, NicheEntry, OutputConfig, SourceEntry,
    UserAgentConfig,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use settings::{CrawlSettings, MAX_LEADS};
