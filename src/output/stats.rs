//! Per-run crawl diagnostics
//!
//! A lead collection alone cannot tell "zero leads because every page was
//! blocked" apart from "zero leads because none existed". The report keeps
//! per-source page outcomes and selector-tier hits so a run can be judged
//! after the fact.

use crate::crawler::{PageFetch, SelectorTier};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Outcome counts for one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    /// Source name
    pub source: String,

    /// First-page search URL
    pub search_url: String,

    /// Pages requested from the gate
    pub pages_attempted: u32,

    /// Pages fetched over the network
    pub pages_fetched: u32,

    /// Pages served from the page cache
    pub pages_cached: u32,

    /// Pages blocked by robots.txt
    pub pages_disallowed: u32,

    /// Non-2xx responses and transport failures
    pub pages_failed: u32,

    /// Pages with content but no listing fragments
    pub pages_without_listings: u32,

    /// Pages won by each selector tier
    pub tier_hits: BTreeMap<SelectorTier, u32>,

    /// Listing fragments handed to the extractor
    pub fragments: usize,

    /// Leads accepted into the collection
    pub leads: usize,

    /// Whether `leads` reached the per-source minimum
    pub threshold_met: bool,
}

impl SourceReport {
    pub fn new(source: &str, search_url: &str) -> Self {
        Self {
            source: source.to_string(),
            search_url: search_url.to_string(),
            pages_attempted: 0,
            pages_fetched: 0,
            pages_cached: 0,
            pages_disallowed: 0,
            pages_failed: 0,
            pages_without_listings: 0,
            tier_hits: BTreeMap::new(),
            fragments: 0,
            leads: 0,
            threshold_met: false,
        }
    }

    /// Records the gate's answer for one page
    pub fn record_fetch(&mut self, fetch: &PageFetch) {
        self.pages_attempted += 1;
        match fetch {
            PageFetch::Cached(_) => self.pages_cached += 1,
            PageFetch::Fetched(_) => self.pages_fetched += 1,
            PageFetch::Disallowed => self.pages_disallowed += 1,
            PageFetch::HttpStatus(_) | PageFetch::Unreachable(_) => self.pages_failed += 1,
        }
    }

    /// Records which tier produced listings on one page
    pub fn record_listings(&mut self, tier: Option<SelectorTier>, fragments: usize) {
        match tier {
            Some(tier) => {
                *self.tier_hits.entry(tier).or_insert(0) += 1;
                self.fragments += fragments;
            }
            None => self.pages_without_listings += 1,
        }
    }

    /// Pages that produced content, cached or live
    pub fn pages_with_content(&self) -> u32 {
        self.pages_fetched + self.pages_cached
    }
}

/// Diagnostics for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub niche: String,

    /// False when the niche had no configured sources
    pub known_niche: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Sources in crawl order; sources never reached are absent
    pub sources: Vec<SourceReport>,

    pub total_leads: usize,

    /// Global lead cap in force
    pub cap: usize,

    /// Whether crawling stopped because the cap was reached
    pub cap_reached: bool,
}

impl CrawlReport {
    pub fn new(niche: &str, cap: usize) -> Self {
        Self {
            niche: niche.to_string(),
            known_niche: true,
            started_at: Utc::now(),
            finished_at: None,
            sources: Vec::new(),
            total_leads: 0,
            cap,
            cap_reached: false,
        }
    }

    /// Stamps the finish time and final totals
    pub fn finish(&mut self, total_leads: usize) {
        self.total_leads = total_leads;
        self.cap_reached = total_leads >= self.cap;
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    pub fn pages_attempted(&self) -> u32 {
        self.sources.iter().map(|s| s.pages_attempted).sum()
    }

    pub fn pages_with_content(&self) -> u32 {
        self.sources.iter().map(|s| s.pages_with_content()).sum()
    }

    pub fn pages_disallowed(&self) -> u32 {
        self.sources.iter().map(|s| s.pages_disallowed).sum()
    }

    pub fn pages_failed(&self) -> u32 {
        self.sources.iter().map(|s| s.pages_failed).sum()
    }

    /// Sources whose yield fell below the per-source minimum
    pub fn weak_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| !s.threshold_met)
    }
}

/// Prints a run report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Harvest Report: {} ===\n", report.niche);

    if !report.known_niche {
        println!("Niche '{}' has no configured sources; nothing crawled.", report.niche);
        return;
    }

    println!("Overview:");
    println!("  Sources crawled: {}", report.sources.len());
    println!("  Pages attempted: {}", report.pages_attempted());
    println!("  Pages with content: {}", report.pages_with_content());
    println!("  Pages disallowed: {}", report.pages_disallowed());
    println!("  Pages failed: {}", report.pages_failed());
    println!("  Leads: {} / {}", report.total_leads, report.cap);
    if let Some(seconds) = report.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    if report.cap_reached {
        println!("  Lead cap reached, crawl stopped early");
    }
    println!();

    println!("Per Source:");
    for source in &report.sources {
        let marker = if source.threshold_met { "✓" } else { "✗" };
        println!(
            "  {} {}: {} leads ({} live, {} cached, {} disallowed, {} failed)",
            marker,
            source.source,
            source.leads,
            source.pages_fetched,
            source.pages_cached,
            source.pages_disallowed,
            source.pages_failed
        );
        for (tier, pages) in &source.tier_hits {
            println!("      {}: {} pages", tier, pages);
        }
    }
}
