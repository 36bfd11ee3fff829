//! Source catalog
//!
//! The catalog maps each niche to the ordered list of directory sites that
//! are searched for it, and resolves each site's URL template into concrete
//! search and page URLs.

mod template;

pub use template::{page_url, resolve_search_url, DEFAULT_CATEGORY_ID};

use crate::config::Config;
use std::collections::HashMap;

/// One external directory site definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Human readable name used in logs and reports
    pub name: String,

    /// Scheme and host, e.g. `https://www.yep.co.za`
    pub base_url: String,

    /// Path and query template with `{query}`, `{category}` and `{region}` placeholders
    pub search_path: String,
}

impl Source {
    /// Returns true if the template is keyed by category id rather than free text
    pub fn is_category_keyed(&self) -> bool {
        self.search_path.contains("{category}")
    }
}

/// A configured niche and its description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicheInfo {
    pub key: String,
    pub description: String,
}

/// Niche to source mapping plus the niche to category-id lookup
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    niches: Vec<NicheInfo>,
    sources: HashMap<String, Vec<Source>>,
    categories: HashMap<String, String>,
}

impl SourceCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog from configuration
    ///
    /// A niche without an explicit source list is searched on every
    /// declared source, in declaration order.
    pub fn from_config(config: &Config) -> Self {
        let all: Vec<Source> = config
            .sources
            .iter()
            .map(|entry| Source {
                name: entry.name.clone(),
                base_url: entry.base_url.trim_end_matches('/').to_string(),
                search_path: entry.search_path.clone(),
            })
            .collect();

        let mut catalog = Self::new();
        for niche in &config.niches {
            let sources = match &niche.sources {
                Some(names) => names
                    .iter()
                    .filter_map(|name| all.iter().find(|s| &s.name == name).cloned())
                    .collect(),
                None => all.clone(),
            };
            catalog.insert_niche(&niche.key, &niche.description, sources);
            if let Some(category) = &niche.category_id {
                catalog.set_category(&niche.key, category);
            }
        }
        catalog
    }

    /// Registers a niche with its ordered sources
    pub fn insert_niche(&mut self, key: &str, description: &str, sources: Vec<Source>) {
        if !self.sources.contains_key(key) {
            self.niches.push(NicheInfo {
                key: key.to_string(),
                description: description.to_string(),
            });
        }
        self.sources.insert(key.to_string(), sources);
    }

    /// Sets the category id used by category-keyed templates for a niche
    pub fn set_category(&mut self, niche: &str, category_id: &str) {
        self.categories
            .insert(niche.to_string(), category_id.to_string());
    }

    /// Sources for a niche in crawl order; empty for unknown niches
    pub fn sources_for(&self, niche: &str) -> &[Source] {
        self.sources.get(niche).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if the niche is configured
    pub fn contains(&self, niche: &str) -> bool {
        self.sources.contains_key(niche)
    }

    /// Category id configured for a niche, if any
    pub fn category_for(&self, niche: &str) -> Option<&str> {
        self.categories.get(niche).map(String::as_str)
    }

    /// Configured niches in declaration order
    pub fn niches(&self) -> &[NicheInfo] {
        &self.niches
    }

    /// Resolves the first-page search URL of `source` for `niche`
    pub fn search_url(&self, source: &Source, niche: &str, region: &str) -> String {
        resolve_search_url(source, niche, self.category_for(niche), region)
    }
}
