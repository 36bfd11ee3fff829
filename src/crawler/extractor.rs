//! Heuristic lead extraction from listing fragments
//!
//! No directory provides a consistent schema, so a fragment is flattened to
//! plain text and mined with layered, degrading heuristics:
//!
//! 1. reject navigation, footer and ad boilerplate
//! 2. name from the first comma segment, else from the leading words
//! 3. address from the first comma segment with a digit and a known city
//!    or a postal code
//! 4. phone from an ordered list of patterns, first match kept verbatim
//!
//! Precision is traded for coverage; downstream cleaning tolerates noise.

use crate::leads::{is_numeric, LeadRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

/// Phrases marking a fragment as boilerplate (matched case-insensitively)
pub const BOILERPLATE_PHRASES: &[&str] = &[
    "premium user",
    "view details",
    "operating:",
    "open now",
    "closed now",
    "previous next",
    "the new yep!",
    "© yep!",
    "waterproofing professionals",
    "home services",
    "building contractors",
];

/// Cities that mark a comma segment as an address
pub const KNOWN_CITIES: &[&str] = &[
    "cape town",
    "johannesburg",
    "durban",
    "pretoria",
    "port elizabeth",
    "bloemfontein",
    "east london",
    "kimberley",
];

/// Leading token stripped before the word-run name fallback
const LEADING_BOILERPLATE: &str = "premium user";

/// Words considered by the word-run name fallback
const MAX_NAME_WORDS: usize = 5;

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit pattern"));

static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}").expect("valid postal code pattern"));

/// Phone patterns, tried in order
static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 012-345-6789, 012.345.6789, 012 345 6789
        r"\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b",
        // 0123456789
        r"\b\d{10}\b",
        // +27 1 234 567 890
        r"\+\d{2}[-.\s]\d[-.\s]\d{3}[-.\s]\d{3}[-.\s]\d{3}\b",
        // 12 345 6789
        r"\d{2}[-.\s]\d{3}[-.\s]\d{4}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid phone pattern"))
    .collect()
});

/// Extracts a lead from one listing fragment
///
/// Returns `None` for boilerplate and for fragments without a usable name.
pub fn extract(fragment: ElementRef<'_>, niche: &str) -> Option<LeadRecord> {
    extract_from_text(&flatten_text(fragment), niche)
}

/// Flattens a fragment to whitespace-normalized plain text
pub fn flatten_text(fragment: ElementRef<'_>) -> String {
    fragment
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts a lead from already flattened fragment text
pub fn extract_from_text(text: &str, niche: &str) -> Option<LeadRecord> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if is_boilerplate(&text) {
        return None;
    }

    let segments: Vec<&str> = text.split(',').map(str::trim).collect();

    let mut name = None;
    let mut address = None;

    if segments.len() >= 2 {
        let candidate = segments[0];
        if candidate.chars().count() > 3 && !is_numeric(candidate) {
            name = Some(candidate.to_string());
        }
        address = find_address(&segments);
    }

    let name = match name {
        Some(name) => name,
        None => leading_word_run(&text)?,
    };

    LeadRecord::new(&name, find_phone(&text), address, niche)
}

/// Returns true if the text contains any boilerplate phrase
pub fn is_boilerplate(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BOILERPLATE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// First segment with a digit and either a known city or a 4-digit run
fn find_address(segments: &[&str]) -> Option<String> {
    segments
        .iter()
        .find(|segment| {
            let lowered = segment.to_lowercase();
            DIGIT.is_match(segment)
                && (KNOWN_CITIES.iter().any(|city| lowered.contains(city))
                    || POSTAL_CODE.is_match(segment))
        })
        .map(|segment| segment.to_string())
}

/// Longest run of name-like words from the start of the text
///
/// Trailing commas are dropped. Words count while longer than two
/// characters and not purely numeric; the run stops at the first word that
/// fails.
fn leading_word_run(text: &str) -> Option<String> {
    let text = strip_leading_boilerplate(text);

    let words: Vec<&str> = text
        .split_whitespace()
        .take(MAX_NAME_WORDS)
        .map(|word| word.trim_end_matches(','))
        .take_while(|word| word.chars().count() > 2 && !is_numeric(word))
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn strip_leading_boilerplate(text: &str) -> &str {
    match text.get(..LEADING_BOILERPLATE.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(LEADING_BOILERPLATE) => {
            text[LEADING_BOILERPLATE.len()..].trim_start()
        }
        _ => text,
    }
}

/// First match of the first phone pattern that matches at all
fn find_phone(text: &str) -> Option<String> {
    PHONE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}
