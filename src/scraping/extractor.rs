// src/scraping/extractor.rs
use super::sources::SelectorSet;
use crate::types::Listing;
use crate::utils::{absolutize_link, clean_text};
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

/// Selector strings of one source, parsed once when the adapter is built
pub struct CompiledSelectors {
    card: Selector,
    title: Selector,
    company: Option<Selector>,
    location: Option<Selector>,
    salary: Option<Selector>,
    link: Option<Selector>,
    link_attr: String,
    require_title: bool,
}

impl CompiledSelectors {
    pub fn compile(set: &SelectorSet) -> Result<Self> {
        Ok(Self {
            card: parse_selector(&set.card)?,
            title: parse_selector(&set.title)?,
            company: parse_optional(set.company.as_deref())?,
            location: parse_optional(set.location.as_deref())?,
            salary: parse_optional(set.salary.as_deref())?,
            link: parse_optional(set.link.as_deref())?,
            link_attr: set.link_attr.clone(),
            require_title: set.require_title,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {}", selector, e))
}

fn parse_optional(selector: Option<&str>) -> Result<Option<Selector>> {
    selector.map(parse_selector).transpose()
}

pub struct ListingExtractor {
    selectors: CompiledSelectors,
    source: String,
    base_origin: String,
}

impl ListingExtractor {
    pub fn new(selectors: CompiledSelectors, source: &str, base_origin: &str) -> Self {
        Self {
            selectors,
            source: source.to_string(),
            base_origin: base_origin.to_string(),
        }
    }

    /// Extract every listing card on the page. Missing fields become empty
    /// strings; nothing is guessed or backfilled.
    pub fn extract(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        document
            .select(&self.selectors.card)
            .filter_map(|card| self.extract_card(card))
            .collect()
    }

    fn extract_card(&self, card: ElementRef<'_>) -> Option<Listing> {
        let title = first_text(card, Some(&self.selectors.title));
        if self.selectors.require_title && title.is_empty() {
            return None;
        }

        let href = match &self.selectors.link {
            Some(selector) => card
                .select(selector)
                .next()
                .and_then(|el| el.value().attr(&self.selectors.link_attr)),
            None => card.value().attr(&self.selectors.link_attr),
        }
        .unwrap_or_default();

        Some(Listing {
            title,
            company: first_text(card, self.selectors.company.as_ref()),
            location: first_text(card, self.selectors.location.as_ref()),
            salary: first_text(card, self.selectors.salary.as_ref()),
            link: absolutize_link(href, &self.base_origin),
            source: self.source.clone(),
            ..Default::default()
        })
    }
}

fn first_text(card: ElementRef<'_>, selector: Option<&Selector>) -> String {
    selector
        .and_then(|s| card.select(s).next())
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="card">
            <a class="title" href="/jobs/1">  Rust
               Engineer </a>
            <span class="company">Acme</span>
            <span class="loc">Bangalore</span>
            <span class="pay">12 LPA</span>
          </div>
          <div class="card">
            <a class="title" href="https://other.example/jobs/2">Backend Developer</a>
          </div>
          <div class="card">
            <span class="company">No Title Ltd</span>
          </div>
        </body></html>
    "#;

    fn selector_set(require_title: bool) -> SelectorSet {
        SelectorSet {
            card: "div.card".to_string(),
            title: "a.title".to_string(),
            company: Some("span.company".to_string()),
            location: Some("span.loc".to_string()),
            salary: Some("span.pay".to_string()),
            link: Some("a.title".to_string()),
            link_attr: "href".to_string(),
            require_title,
        }
    }

    fn extractor(require_title: bool) -> ListingExtractor {
        let selectors = CompiledSelectors::compile(&selector_set(require_title)).unwrap();
        ListingExtractor::new(selectors, "TestBoard", "https://board.example")
    }

    #[test]
    fn test_extracts_fields_and_absolutizes_links() {
        let listings = extractor(true).extract(PAGE);
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.title, "Rust Engineer");
        assert_eq!(first.company, "Acme");
        assert_eq!(first.location, "Bangalore");
        assert_eq!(first.salary, "12 LPA");
        assert_eq!(first.link, "https://board.example/jobs/1");
        assert_eq!(first.source, "TestBoard");

        let second = &listings[1];
        assert_eq!(second.link, "https://other.example/jobs/2");
        assert_eq!(second.company, "");
        assert_eq!(second.salary, "");
    }

    #[test]
    fn test_keeps_partial_records_when_title_not_required() {
        let listings = extractor(false).extract(PAGE);
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[2].title, "");
        assert_eq!(listings[2].company, "No Title Ltd");
        assert_eq!(listings[2].link, "");
    }

    #[test]
    fn test_script_links_are_blanked() {
        let html = r#"<div class="card"><a class="title" href="javascript:void(0)">Apply Now Role</a></div>"#;
        let listings = extractor(true).extract(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Apply Now Role");
        assert_eq!(listings[0].link, "");
    }

    #[test]
    fn test_malformed_html_yields_no_listings() {
        let listings = extractor(true).extract("<div><p>unclosed <b>markup");
        assert!(listings.is_empty());
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let mut set = selector_set(true);
        set.card = "div[".to_string();
        assert!(CompiledSelectors::compile(&set).is_err());
    }
}
