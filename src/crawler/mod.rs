//! Crawler module for directory page fetching and lead extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed timeout and no retries
//! - The politeness gate (page cache, robots.txt, rate limit)
//! - Listing discovery through a prioritized selector cascade
//! - Heuristic lead extraction from listing fragments
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod gate;
mod parser;

pub use coordinator::{run_harvest, Coordinator};
pub use extractor::{
    extract, extract_from_text, flatten_text, is_boilerplate, BOILERPLATE_PHRASES, KNOWN_CITIES,
};
pub use fetcher::{build_http_client, fetch_url, FetchResult, REQUEST_TIMEOUT};
pub use gate::{PageFetch, PolitenessGate};
pub use parser::{
    parse_document, select_listings, ListingMatch, ListingStrategy, SelectorTier, LISTING_CASCADE,
};
