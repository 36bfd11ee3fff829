//! Listing discovery for directory result pages
//!
//! Directory sites share no markup schema, so candidate listing fragments
//! are located with a prioritized cascade of selector strategies. The
//! cascade is evaluated in order and stops at the first strategy that
//! matches anything; later strategies are never consulted, even if they
//! would have matched more.
//!
//! | Tier           | Strategy                                              |
//! |----------------|-------------------------------------------------------|
//! | ExactClass     | `div.listing-item`, `div.business-listing`, `article.listing` |
//! | ListingClass   | `div`, `tr`, `li` with a class containing `listing` or `business` |
//! | ContainerClass | `div` with a class containing `item`, `card` or `result` |
//! | DetailLink     | `a` whose `href` contains `/business/`                |

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

static LISTING_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"listing|business").expect("valid listing class pattern"));

static CONTAINER_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"item|card|result").expect("valid container class pattern"));

static DETAIL_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/business/").expect("valid detail link pattern"));

/// Cascade tier a listing strategy belongs to, most specific first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectorTier {
    /// Exact, well-known listing class names
    ExactClass,
    /// Class names mentioning "listing" or "business"
    ListingClass,
    /// Generic item/card/result containers
    ContainerClass,
    /// Links to business detail pages, last resort
    DetailLink,
}

impl SelectorTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactClass => "exact-class",
            Self::ListingClass => "listing-class",
            Self::ContainerClass => "container-class",
            Self::DetailLink => "detail-link",
        }
    }
}

impl fmt::Display for SelectorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type SelectFn = for<'a> fn(&'a Html) -> Vec<ElementRef<'a>>;

/// One pure selector strategy of the cascade
pub struct ListingStrategy {
    pub tier: SelectorTier,
    pub label: &'static str,
    select: SelectFn,
}

impl ListingStrategy {
    /// Runs this strategy alone against a document
    pub fn select<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        (self.select)(document)
    }
}

/// The cascade, in evaluation order
pub static LISTING_CASCADE: [ListingStrategy; 8] = [
    ListingStrategy {
        tier: SelectorTier::ExactClass,
        label: "div.listing-item",
        select: listing_item_divs,
    },
    ListingStrategy {
        tier: SelectorTier::ExactClass,
        label: "div.business-listing",
        select: business_listing_divs,
    },
    ListingStrategy {
        tier: SelectorTier::ExactClass,
        label: "article.listing",
        select: listing_articles,
    },
    ListingStrategy {
        tier: SelectorTier::ListingClass,
        label: "div[class~=listing|business]",
        select: listing_class_divs,
    },
    ListingStrategy {
        tier: SelectorTier::ListingClass,
        label: "tr[class~=listing|business]",
        select: listing_class_rows,
    },
    ListingStrategy {
        tier: SelectorTier::ListingClass,
        label: "li[class~=listing|business]",
        select: listing_class_items,
    },
    ListingStrategy {
        tier: SelectorTier::ContainerClass,
        label: "div[class~=item|card|result]",
        select: container_class_divs,
    },
    ListingStrategy {
        tier: SelectorTier::DetailLink,
        label: "a[href~=/business/]",
        select: detail_links,
    },
];

/// Listing fragments found on one page
pub struct ListingMatch<'a> {
    pub tier: SelectorTier,
    pub strategy: &'static str,
    pub fragments: Vec<ElementRef<'a>>,
}

/// Parses a page body into a document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Runs the cascade and returns the first non-empty strategy's fragments
///
/// Returns `None` when no strategy matches anything.
pub fn select_listings(document: &Html) -> Option<ListingMatch<'_>> {
    LISTING_CASCADE.iter().find_map(|strategy| {
        let fragments = strategy.select(document);
        if fragments.is_empty() {
            None
        } else {
            Some(ListingMatch {
                tier: strategy.tier,
                strategy: strategy.label,
                fragments,
            })
        }
    })
}

fn listing_item_divs(document: &Html) -> Vec<ElementRef<'_>> {
    select_css(document, "div.listing-item")
}

fn business_listing_divs(document: &Html) -> Vec<ElementRef<'_>> {
    select_css(document, "div.business-listing")
}

fn listing_articles(document: &Html) -> Vec<ElementRef<'_>> {
    select_css(document, "article.listing")
}

fn listing_class_divs(document: &Html) -> Vec<ElementRef<'_>> {
    select_by_class(document, "div", &LISTING_CLASS)
}

fn listing_class_rows(document: &Html) -> Vec<ElementRef<'_>> {
    select_by_class(document, "tr", &LISTING_CLASS)
}

fn listing_class_items(document: &Html) -> Vec<ElementRef<'_>> {
    select_by_class(document, "li", &LISTING_CLASS)
}

fn container_class_divs(document: &Html) -> Vec<ElementRef<'_>> {
    select_by_class(document, "div", &CONTAINER_CLASS)
}

fn detail_links(document: &Html) -> Vec<ElementRef<'_>> {
    select_css(document, "a[href]")
        .into_iter()
        .filter(|element| {
            element
                .value()
                .attr("href")
                .map_or(false, |href| DETAIL_HREF.is_match(href))
        })
        .collect()
}

fn select_css<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Elements named `tag` with at least one class token matching `pattern`
fn select_by_class<'a>(document: &'a Html, tag: &str, pattern: &Regex) -> Vec<ElementRef<'a>> {
    select_css(document, &format!("{}[class]", tag))
        .into_iter()
        .filter(|element| element.value().classes().any(|class| pattern.is_match(class)))
        .collect()
}
