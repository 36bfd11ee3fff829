//! Lead records and the bounded collection a crawl run produces

mod collection;
mod record;

pub use collection::LeadCollection;
pub use record::{is_numeric, LeadRecord, NOT_AVAILABLE};
