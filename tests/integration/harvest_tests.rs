//! Integration tests for the harvest loop
//!
//! These tests use wiremock to serve directory result pages and run the
//! coordinator end-to-end against them.

use lead_harvest::config::{parse_config, CrawlSettings};
use lead_harvest::crawler::{Coordinator, SelectorTier};
use lead_harvest::storage::{CacheStore, JsonFileCache};
use lead_harvest::LeadCollection;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches on the `page` query parameter; `None` means absent (first page)
struct PageParam(Option<&'static str>);

impl Match for PageParam {
    fn matches(&self, request: &Request) -> bool {
        let page = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| value.into_owned());
        page.as_deref() == self.0
    }
}

const AGENT_SECTION: &str = r#"
[user-agent]
crawler-name = "HarvestTest"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[output]
csv-path = "./leads.csv"
summary-path = "./summary.md"
"#;

/// Settings with the given `[[source]]`/`[[niche]]` tables, no robots, zero delay
fn test_settings(cache_path: &Path, catalog: &str) -> CrawlSettings {
    let toml = format!(
        r#"
[crawler]
region = "Cape Town"
rate-limit-seconds = 0.0
respect-robots = false
min-leads-per-source = 2

[cache]
path = "{cache_path}"
{agent}
{catalog}
"#,
        cache_path = cache_path.display(),
        agent = AGENT_SECTION,
        catalog = catalog,
    );

    CrawlSettings::from_config(&parse_config(&toml).expect("valid test config"))
}

fn source_table(name: &str, base_url: &str, search_path: &str) -> String {
    format!(
        "[[source]]\nname = \"{}\"\nbase-url = \"{}\"\nsearch-path = \"{}\"\n",
        name, base_url, search_path
    )
}

fn coordinator(settings: CrawlSettings) -> Coordinator {
    let cache = JsonFileCache::open(&settings.cache_path).expect("open cache");
    Coordinator::new(settings, Box::new(cache)).expect("build coordinator")
}

fn names(leads: &LeadCollection) -> Vec<&str> {
    leads.iter().map(|lead| lead.name.as_str()).collect()
}

/// A page of `count` exact-class listings, numbered from `first`
fn listing_page(first: usize, count: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in first..first + count {
        html.push_str(&format!(
            "<div class=\"listing-item\"><h3>Business Number{},</h3><span>021-555-{:04}</span></div>",
            i,
            i % 10_000
        ));
    }
    html.push_str("</body></html>");
    html
}

#[tokio::test]
async fn test_unknown_niche_makes_no_requests() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    let catalog = format!(
        "{}\n[[niche]]\nkey = \"plumbers\"\n",
        source_table("Mock", &server.uri(), "/search?what={query}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let (leads, report) = coordinator.scrape_with_report("astronauts", 5).await;

    assert!(leads.is_empty());
    assert!(!report.known_niche);
    assert!(report.sources.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_three_container_fragments() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    let page = r#"<html><body>
        <div class="item"><h3>Sunrise Realty</h3><p>12 Long Street Cape Town</p><p>021-555-1234</p></div>
        <div class="card"><h3>Coastal Homes</h3><p>7 Beach Road Durban</p><p>031 555 9876</p></div>
        <div class="result"><h3>Metro Property</h3><p>90 Main Road Pretoria</p><p>0125550000</p></div>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(PageParam(None))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = format!(
        "{}\n[[niche]]\nkey = \"real_estate\"\n",
        source_table("Mock", &server.uri(), "/search?what={query}&where={region}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let leads = coordinator.scrape("real_estate", 1).await;

    assert_eq!(leads.len(), 3);
    assert_eq!(names(&leads), vec!["Sunrise Realty", "Coastal Homes", "Metro Property"]);
    let phones: Vec<&str> = leads.iter().map(|lead| lead.phone.as_str()).collect();
    assert_eq!(phones, vec!["021-555-1234", "031 555 9876", "0125550000"]);
    for lead in &leads {
        assert_eq!(lead.category, "real_estate");
        assert_eq!(lead.niche, "real_estate");
    }
}

#[tokio::test]
async fn test_sources_crawled_in_catalog_order() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(PageParam(None))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="business-listing">Alpha Plumbing, 1 First Ave Johannesburg, 011-555-0001</div>"#,
        ))
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .and(PageParam(Some("2")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="business-listing">Beta Plumbing, 2 Second Ave Johannesburg, 011-555-0002</div>"#,
        ))
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<li class="listing">Gamma Drains, 3 Third Ave Johannesburg, 011-555-0003</li>"#,
        ))
        .mount(&second)
        .await;

    // Declared order is Second, First; the niche lists First, Second
    let catalog = format!(
        "{}{}\n[[niche]]\nkey = \"plumbers\"\nsources = [\"First\", \"Second\"]\n",
        source_table("Second", &second.uri(), "/find/{query}?near={region}"),
        source_table("First", &first.uri(), "/search?what={query}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let (leads, report) = coordinator.scrape_with_report("plumbers", 2).await;

    // Page 2 of Second serves the same markup, so Gamma appears twice
    assert_eq!(
        names(&leads),
        vec!["Alpha Plumbing", "Beta Plumbing", "Gamma Drains", "Gamma Drains"]
    );
    assert_eq!(leads.records()[0].address, "1 First Ave Johannesburg");

    let order: Vec<&str> = report.sources.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(order, vec!["First", "Second"]);
    assert_eq!(report.sources[0].leads, 2);
    assert_eq!(report.sources[1].leads, 2);
    assert!(report.sources.iter().all(|s| s.threshold_met));
    assert_eq!(
        report.sources[1].search_url,
        format!("{}/find/plumbers?near=Cape+Town", second.uri())
    );

    let second_requests = second.received_requests().await.unwrap();
    assert_eq!(second_requests.len(), 2);
    assert_eq!(second_requests[1].url.query(), Some("near=Cape+Town&page=2"));
}

#[tokio::test]
async fn test_failing_pages_are_skipped() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(PageParam(None))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(PageParam(Some("2")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<article class="listing">Pipe Masters, 4 Dock Rd Cape Town, 021-555-7777</article>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(PageParam(Some("3")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>No results</p>"))
        .mount(&server)
        .await;

    let catalog = format!(
        "{}\n[[niche]]\nkey = \"plumbers\"\n",
        source_table("Flaky", &server.uri(), "/search?what={query}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let (leads, report) = coordinator.scrape_with_report("plumbers", 3).await;

    assert_eq!(names(&leads), vec!["Pipe Masters"]);
    let source = &report.sources[0];
    assert_eq!(source.pages_attempted, 3);
    assert_eq!(source.pages_failed, 1);
    assert_eq!(source.pages_fetched, 2);
    assert_eq!(source.pages_without_listings, 1);
    assert_eq!(source.tier_hits.get(&SelectorTier::ExactClass), Some(&1));
    assert!(!source.threshold_met);
}

#[tokio::test]
async fn test_cascade_precedence_on_page() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    let page = r#"<html><body>
        <div class="card">Card Company, 5 Card St Durban, 031-555-0005</div>
        <tr class="listing-row"><td>Table Company</td></tr>
        <div class="business-listing">Winning Company, 6 Win St Durban, 031-555-0006</div>
        <a href="/business/loser">Link Company</a>
    </body></html>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let catalog = format!(
        "{}\n[[niche]]\nkey = \"plumbers\"\n",
        source_table("Mock", &server.uri(), "/search?what={query}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let leads = coordinator.scrape("plumbers", 1).await;

    assert_eq!(names(&leads), vec!["Winning Company"]);
}

#[tokio::test]
async fn test_global_cap_stops_mid_page() {
    let server = MockServer::start().await;
    let unused = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(PageParam(None))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(0, 300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(PageParam(Some("2")))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(300, 300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(PageParam(Some("3")))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(600, 300)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(900, 10)))
        .expect(0)
        .mount(&unused)
        .await;

    let catalog = format!(
        "{}{}\n[[niche]]\nkey = \"plumbers\"\n",
        source_table("Big", &server.uri(), "/search?what={query}"),
        source_table("Unused", &unused.uri(), "/search?what={query}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let (leads, report) = coordinator.scrape_with_report("plumbers", 5).await;

    assert_eq!(leads.len(), 500);
    assert_eq!(leads.records()[0].name, "Business Number0");
    assert_eq!(leads.records()[499].name, "Business Number499");
    assert!(report.cap_reached);
    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].leads, 500);
}

#[tokio::test]
async fn test_category_keyed_source_uses_default_category() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("category", "81517"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>none</p>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("category", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>none</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = format!(
        "{}\n[[niche]]\nkey = \"tutors\"\n\n[[niche]]\nkey = \"plumbers\"\ncategory-id = \"42\"\n",
        source_table("Yep", &server.uri(), "/search?category={category}&place={region}")
    );
    let mut coordinator = coordinator(test_settings(&temp_dir.path().join("cache.json"), &catalog));

    let (_, report) = coordinator.scrape_with_report("tutors", 1).await;
    assert_eq!(
        report.sources[0].search_url,
        format!("{}/search?category=81517&place=Cape+Town", server.uri())
    );

    coordinator.scrape("plumbers", 1).await;
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("cache.json");

    let page = r#"<html><body>
        <div class="listing-item">Harbour View Estates, 7 Dock Rd, Port Elizabeth 6001, 041 555 2020</div>
        <div class="listing-item">Premium User View Details Operating: 24/7</div>
        <div class="listing-item">12345</div>
        <div class="listing-item">Karoo Land Agents, +27 1 234 567 890</div>
    </body></html>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = format!(
        "{}\n[[niche]]\nkey = \"real_estate\"\n",
        source_table("Mock", &server.uri(), "/search?what={query}")
    );
    let settings = test_settings(&cache_path, &catalog);

    let mut first_run = coordinator(settings.clone());
    let first = first_run.scrape("real_estate", 1).await;
    drop(first_run);

    // The second run is served entirely from the page cache
    let mut second_run = coordinator(settings);
    assert_eq!(second_run.cached_pages(), 1);
    let second = second_run.scrape("real_estate", 1).await;

    assert_eq!(first.records(), second.records());
    assert_eq!(names(&first), vec!["Harbour View Estates", "Karoo Land Agents"]);
    for lead in &first {
        assert!(lead.name.chars().count() >= 3);
        assert!(!lead.name.chars().all(|c| c.is_ascii_digit()));
    }

    let cache = JsonFileCache::open(&cache_path).unwrap();
    assert_eq!(cache.len(), 1);
}
