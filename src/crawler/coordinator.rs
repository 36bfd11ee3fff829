//! Crawler coordinator - the source × page harvest loop
//!
//! Sources for a niche are visited strictly in catalog order, and every
//! source is asked for the same number of result pages. Each page goes
//! through the [`PolitenessGate`]; pages without content are skipped, pages
//! with content are parsed, run through the listing cascade and handed
//! fragment by fragment to the extractor. Nothing at page, fragment or
//! source level aborts the run. Only the global lead cap stops it early,
//! and it does so at the exact fragment that fills the collection.

use crate::catalog::page_url;
use crate::config::{Config, CrawlSettings};
use crate::crawler::extractor::extract;
use crate::crawler::gate::PolitenessGate;
use crate::crawler::parser::{parse_document, select_listings, SelectorTier};
use crate::leads::LeadCollection;
use crate::output::{CrawlReport, SourceReport};
use crate::storage::{open_cache, CacheStore};
use crate::Result;

/// Main crawler coordinator structure
pub struct Coordinator {
    settings: CrawlSettings,
    gate: PolitenessGate,
}

/// What one page contributed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PageYield {
    tier: Option<SelectorTier>,
    fragments: usize,
    accepted: usize,
}

impl Coordinator {
    /// Creates a coordinator over an already opened page cache
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to scrape
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(settings: CrawlSettings, cache: Box<dyn CacheStore + Send>) -> Result<Self> {
        let gate = PolitenessGate::new(&settings, cache)?;
        Ok(Self { settings, gate })
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Number of pages currently held by the page cache
    pub fn cached_pages(&self) -> usize {
        self.gate.cached_pages()
    }

    /// Harvests leads for `niche`
    ///
    /// An unknown niche yields an empty collection without any network
    /// access. Rows come back in crawl order.
    pub async fn scrape(&mut self, niche: &str, max_pages_per_source: u32) -> LeadCollection {
        self.scrape_with_report(niche, max_pages_per_source).await.0
    }

    /// Harvests leads for `niche` and reports what happened per source
    pub async fn scrape_with_report(
        &mut self,
        niche: &str,
        max_pages_per_source: u32,
    ) -> (LeadCollection, CrawlReport) {
        let mut leads = LeadCollection::with_cap(self.settings.max_leads);
        let mut report = CrawlReport::new(niche, leads.cap());

        let sources = self.settings.catalog.sources_for(niche);
        if sources.is_empty() {
            tracing::warn!("No sources configured for niche '{}'", niche);
            report.known_niche = false;
            report.finish(0);
            return (leads, report);
        }

        tracing::info!(
            "Harvesting '{}' from {} sources, {} pages each",
            niche,
            sources.len(),
            max_pages_per_source
        );

        'sources: for source in sources {
            let search_url = self
                .settings
                .catalog
                .search_url(source, niche, &self.settings.region);
            tracing::info!("Scraping {}: {}", source.name, search_url);

            let mut source_report = SourceReport::new(&source.name, &search_url);

            for page in 1..=max_pages_per_source {
                let url = page_url(&search_url, page);
                let fetch = self.gate.fetch(&url).await;
                source_report.record_fetch(&fetch);

                let Some(body) = fetch.into_body() else {
                    tracing::debug!("Skipping page {} of {}", page, source.name);
                    continue;
                };

                let page_yield = harvest_page(&body, niche, &mut leads);
                source_report.record_listings(page_yield.tier, page_yield.fragments);
                source_report.leads += page_yield.accepted;

                match page_yield.tier {
                    Some(tier) => tracing::info!(
                        "{} page {}: {} leads from {} fragments ({})",
                        source.name,
                        page,
                        page_yield.accepted,
                        page_yield.fragments,
                        tier
                    ),
                    None => tracing::info!("{} page {}: no listings found", source.name, page),
                }

                if leads.is_full() {
                    tracing::info!("Reached the cap of {} leads, stopping", leads.cap());
                    close_source(source_report, self.settings.min_leads_per_source, &mut report);
                    break 'sources;
                }
            }

            close_source(source_report, self.settings.min_leads_per_source, &mut report);
        }

        self.gate.flush();
        report.finish(leads.len());

        tracing::info!(
            "Harvest of '{}' complete: {} leads from {} sources",
            niche,
            leads.len(),
            report.sources.len()
        );

        (leads, report)
    }
}

/// Logs a source's yield against the minimum and files its report
fn close_source(mut source_report: SourceReport, min_leads: usize, report: &mut CrawlReport) {
    source_report.threshold_met = source_report.leads >= min_leads;

    if source_report.threshold_met {
        tracing::info!(
            "✓ {}: {} leads (minimum {})",
            source_report.source,
            source_report.leads,
            min_leads
        );
    } else {
        tracing::warn!(
            "{} yielded only {} leads (minimum {})",
            source_report.source,
            source_report.leads,
            min_leads
        );
    }

    report.sources.push(source_report);
}

/// Parses one page and feeds its listing fragments to the extractor
///
/// Stops at the first fragment once the collection is full.
fn harvest_page(body: &str, niche: &str, leads: &mut LeadCollection) -> PageYield {
    let document = parse_document(body);
    let Some(found) = select_listings(&document) else {
        return PageYield::default();
    };

    tracing::debug!(
        "Listing strategy {} matched {} fragments",
        found.strategy,
        found.fragments.len()
    );

    let mut accepted = 0;
    for fragment in found.fragments.iter().copied() {
        if leads.is_full() {
            break;
        }
        if let Some(record) = extract(fragment, niche) {
            if leads.push(record) {
                accepted += 1;
            }
        }
    }

    PageYield {
        tier: Some(found.tier),
        fragments: found.fragments.len(),
        accepted,
    }
}

/// Runs one harvest from a loaded configuration
///
/// Opens the configured page cache, builds the coordinator and scrapes
/// `niche` with `max_pages` result pages per source.
///
/// # Example
///
/// ```no_run
/// use lead_harvest::config::load_config;
/// use lead_harvest::crawler::run_harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let (leads, report) = run_harvest(&config, "real_estate", 5).await?;
/// println!("{} leads, cap reached: {}", leads.len(), report.cap_reached);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(
    config: &Config,
    niche: &str,
    max_pages: u32,
) -> Result<(LeadCollection, CrawlReport)> {
    let settings = CrawlSettings::from_config(config);
    let cache = open_cache(&settings)?;
    let mut coordinator = Coordinator::new(settings, cache)?;
    Ok(coordinator.scrape_with_report(niche, max_pages).await)
}
