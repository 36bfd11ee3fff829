use crate::config::MAX_LEADS;
use crate::leads::LeadRecord;

/// Ordered leads accumulated during one crawl run
///
/// The collection never grows past its cap; [`LeadCollection::push`]
/// refuses records once it is full. Rows are kept in crawl order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadCollection {
    records: Vec<LeadRecord>,
    cap: usize,
}

impl Default for LeadCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadCollection {
    /// Column names of the tabular view
    pub const COLUMNS: [&'static str; 5] = ["name", "phone", "address", "category", "niche"];

    /// Creates an empty collection bounded by the global cap
    pub fn new() -> Self {
        Self::with_cap(MAX_LEADS)
    }

    /// Creates an empty collection with a custom cap
    pub fn with_cap(cap: usize) -> Self {
        Self {
            records: Vec::new(),
            cap,
        }
    }

    /// Appends a record; returns false (and drops it) when the cap is reached
    pub fn push(&mut self, record: LeadRecord) -> bool {
        if self.is_full() {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.cap
    }

    /// Room left before the cap
    pub fn remaining(&self) -> usize {
        self.cap.saturating_sub(self.records.len())
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeadRecord> {
        self.records.iter()
    }

    /// Rows in crawl order, one per record, in [`Self::COLUMNS`] order
    pub fn rows(&self) -> impl Iterator<Item = [&str; 5]> + '_ {
        self.records.iter().map(LeadRecord::as_row)
    }

    pub fn into_records(self) -> Vec<LeadRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a LeadCollection {
    type Item = &'a LeadRecord;
    type IntoIter = std::slice::Iter<'a, LeadRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
