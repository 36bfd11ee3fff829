//! Lead-Harvest: a polite business-directory lead harvester
//!
//! This crate crawls a fixed catalog of public business directories for a
//! chosen niche, respecting robots.txt, rate limits and a persistent page
//! cache, and heuristically recovers name/phone/address records from
//! whatever markup each directory happens to serve.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod leads;
pub mod output;
pub mod robots;
pub mod storage;

use thiserror::Error;

/// Main error type for Lead-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Lead-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Source, SourceCatalog};
pub use config::{Config, CrawlSettings};
pub use crawler::{Coordinator, PolitenessGate};
pub use leads::{LeadCollection, LeadRecord};
pub use output::CrawlReport;
