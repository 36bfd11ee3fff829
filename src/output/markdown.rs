//! Markdown summary generation
//!
//! Renders a [`CrawlReport`] as a human-readable run summary.

use crate::output::stats::CrawlReport;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a run to `output_path`
///
/// # Arguments
///
/// * `report` - The run report
/// * `config_hash` - Hash of the configuration the run used
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(
    report: &CrawlReport,
    config_hash: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(report, config_hash);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_summary(report: &CrawlReport, config_hash: &str) -> String {
    let mut md = String::new();

    md.push_str("# Lead-Harvest Run Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Niche**: {}\n", report.niche));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    md.push_str(&format!("- **Config Hash**: {}\n\n", config_hash));

    if !report.known_niche {
        md.push_str("No sources are configured for this niche. Nothing was crawled.\n");
        return md;
    }

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Sources Crawled**: {}\n", report.sources.len()));
    md.push_str(&format!(
        "- **Pages Attempted**: {}\n",
        report.pages_attempted()
    ));
    md.push_str(&format!(
        "- **Pages With Content**: {}\n",
        report.pages_with_content()
    ));
    md.push_str(&format!(
        "- **Pages Disallowed**: {}\n",
        report.pages_disallowed()
    ));
    md.push_str(&format!("- **Pages Failed**: {}\n", report.pages_failed()));
    md.push_str(&format!(
        "- **Leads**: {} / {}\n",
        report.total_leads, report.cap
    ));
    if report.cap_reached {
        md.push_str("- **Lead cap reached**: remaining pages and sources were skipped\n");
    }
    md.push('\n');

    md.push_str("## Per-Source Breakdown\n\n");
    md.push_str("| Source | Pages | Live | Cached | Disallowed | Failed | Leads | Threshold |\n");
    md.push_str("|--------|-------|------|--------|------------|--------|-------|-----------|\n");
    for source in &report.sources {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            source.source,
            source.pages_attempted,
            source.pages_fetched,
            source.pages_cached,
            source.pages_disallowed,
            source.pages_failed,
            source.leads,
            if source.threshold_met { "met" } else { "below" }
        ));
    }
    md.push('\n');

    let tiered: Vec<_> = report
        .sources
        .iter()
        .filter(|s| !s.tier_hits.is_empty())
        .collect();
    if !tiered.is_empty() {
        md.push_str("## Selector Tiers\n\n");
        md.push_str("| Source | Tier | Pages |\n");
        md.push_str("|--------|------|-------|\n");
        for source in tiered {
            for (tier, pages) in &source.tier_hits {
                md.push_str(&format!("| {} | {} | {} |\n", source.source, tier, pages));
            }
        }
        md.push('\n');
    }

    let weak: Vec<_> = report.weak_sources().collect();
    if !weak.is_empty() {
        md.push_str("## Sources Below Threshold\n\n");
        for source in weak {
            md.push_str(&format!(
                "- {} ({} leads, {} pages without listings)\n",
                source.source, source.leads, source.pages_without_listings
            ));
        }
        md.push('\n');
    }

    md
}
