//! CSV export of collected leads

use crate::leads::LeadCollection;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the collection to `path` with a `name,phone,address,category,niche` header
///
/// The file is replaced if it exists. Rows appear in crawl order.
pub fn export_csv(leads: &LeadCollection, path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_csv(leads, file)?;

    tracing::info!("Wrote {} leads to {}", leads.len(), path.display());
    Ok(())
}

/// Writes the collection as CSV to any writer
pub fn write_csv<W: Write>(leads: &LeadCollection, writer: W) -> OutputResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(LeadCollection::COLUMNS)?;
    for row in leads.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}
