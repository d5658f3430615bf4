#![allow(dead_code)]

use anyhow::Result;
use applymate::enrichment::TextGenerator;
use applymate::fallback::{BuiltinCatalog, CatalogProvider, FallbackCatalog};
use applymate::scraping::{build_adapters, FetchError, PageFetcher, SelectorSet, Separator, SourceSpec, UrlSpec};
use applymate::{Aggregator, EnrichmentEngine, EnrichmentOptions, SearchService};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use url::Url;

/// A listing card in the markup every test board uses
pub fn card(title: &str, company: &str, location: &str, href: &str) -> String {
    format!(
        r#"<div class="job">
             <h2><a href="{href}">{title}</a></h2>
             <span class="company">{company}</span>
             <span class="location">{location}</span>
           </div>"#
    )
}

pub fn page(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.join("\n"))
}

pub fn board_spec(name: &str, origin: &str) -> SourceSpec {
    SourceSpec {
        name: name.to_string(),
        base_origin: origin.to_string(),
        enabled: true,
        salary_placeholder: "Not specified".to_string(),
        url: UrlSpec {
            template: format!("{}/search?q={{query}}{{location}}", origin),
            separator: Separator::Plus,
            location_fragment: Some("&l={location}".to_string()),
            experience_param: None,
            experience_values: BTreeMap::new(),
        },
        selectors: SelectorSet {
            card: "div.job".to_string(),
            title: "h2 a".to_string(),
            company: Some("span.company".to_string()),
            location: Some("span.location".to_string()),
            salary: Some("span.salary".to_string()),
            link: Some("h2 a".to_string()),
            link_attr: "href".to_string(),
            require_title: true,
        },
    }
}

/// Serves canned pages keyed by host; unknown hosts fail like an unreachable site
pub struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        self.pages
            .get(&host)
            .cloned()
            .ok_or_else(|| FetchError::Network(format!("connection refused: {}", host)))
    }
}

/// Five boards `board1.example` .. `board5.example`; `pages` maps board
/// number to its page, missing boards fail
pub fn stub_aggregator(pages: Vec<(usize, String)>) -> Aggregator {
    let specs: Vec<SourceSpec> = (1..=5)
        .map(|n| board_spec(&format!("Board{}", n), &format!("https://board{}.example", n)))
        .collect();

    let pages = pages
        .into_iter()
        .map(|(n, html)| (format!("board{}.example", n), html))
        .collect();

    let adapters = build_adapters(&specs, Arc::new(StubFetcher::new(pages))).unwrap();
    Aggregator::new(adapters)
}

pub fn service(aggregator: Aggregator, generator: Option<Arc<dyn TextGenerator>>) -> SearchService {
    service_with_catalog(aggregator, generator, Arc::new(BuiltinCatalog))
}

pub fn service_with_catalog(
    aggregator: Aggregator,
    generator: Option<Arc<dyn TextGenerator>>,
    provider: Arc<dyn CatalogProvider>,
) -> SearchService {
    let engine = EnrichmentEngine::new(
        generator,
        FallbackCatalog::new(provider),
        EnrichmentOptions::default(),
    );
    SearchService::new(aggregator, engine)
}

/// Scores listings by their position in the prompt (later = higher) and
/// answers garbage for any batch mentioning `poison`
pub struct ScriptedGenerator {
    pub poison: Option<String>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Some(poison) = &self.poison {
            if prompt.contains(poison.as_str()) {
                return Ok("I'm sorry, here are some thoughts: {not json".to_string());
            }
        }

        let start = prompt.find("JOB LISTINGS:\n").unwrap() + "JOB LISTINGS:\n".len();
        let end = prompt.find("\n\nTASK:").unwrap();
        let items: Vec<serde_json::Value> = serde_json::from_str(&prompt[start..end]).unwrap();

        let annotations: Vec<serde_json::Value> = (0..items.len())
            .rev()
            .map(|i| {
                serde_json::json!({
                    "index": i,
                    "matchScore": 50 + i * 10,
                    "recommendations": format!("Recommendation {}", i),
                    "difficulty": "Hard",
                    "keywords": ["scripted"],
                })
            })
            .collect();

        Ok(format!("```json\n{}\n```", serde_json::to_string(&annotations)?))
    }
}
