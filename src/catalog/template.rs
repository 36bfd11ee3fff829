//! URL template resolution for directory sources

use crate::catalog::Source;

/// Category id substituted when a niche has no entry in the category lookup
///
/// This is the "Property & Real Estate" id, so every unmapped niche ends up
/// searching real estate on category-keyed sources.
pub const DEFAULT_CATEGORY_ID: &str = "81517";

/// Resolves a source template into the first-page search URL
///
/// Query-keyed templates get the niche with `_` replaced by `+`;
/// category-keyed templates get `category_id`, or [`DEFAULT_CATEGORY_ID`]
/// when the niche is unmapped. `{region}` is substituted in both cases.
///
/// # Example
///
/// ```
/// use lead_harvest::catalog::{resolve_search_url, Source};
///
/// let source = Source {
///     name: "Hotfrog SA".to_string(),
///     base_url: "https://hotfrog.co.za".to_string(),
///     search_path: "/search?what={query}&where={region}".to_string(),
/// };
/// assert_eq!(
///     resolve_search_url(&source, "car_dealers", None, "South Africa"),
///     "https://hotfrog.co.za/search?what=car+dealers&where=South+Africa"
/// );
/// ```
pub fn resolve_search_url(
    source: &Source,
    niche: &str,
    category_id: Option<&str>,
    region: &str,
) -> String {
    let region = region.trim().replace(' ', "+");

    let path = if source.is_category_keyed() {
        let category = category_id.unwrap_or(DEFAULT_CATEGORY_ID);
        source.search_path.replace("{category}", category)
    } else {
        source.search_path.replace("{query}", &niche.replace('_', "+"))
    };

    format!("{}{}", source.base_url, path.replace("{region}", &region))
}

/// Builds the URL of result page `page` from a first-page search URL
///
/// Page 1 is the search URL itself; later pages append a `page` parameter.
pub fn page_url(search_url: &str, page: u32) -> String {
    if page <= 1 {
        return search_url.to_string();
    }

    let separator = if search_url.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", search_url, separator, page)
}
