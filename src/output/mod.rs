//! Output module for lead exports and run reports
//!
//! This module handles:
//! - Exporting the lead collection as CSV
//! - Collecting per-source crawl diagnostics
//! - Generating markdown summaries of a run

mod csv_export;
mod markdown;
pub mod stats;

pub use csv_export::{export_csv, write_csv};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_report, CrawlReport, SourceReport};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
