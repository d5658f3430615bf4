// src/scraping/adapter.rs
use super::extractor::{CompiledSelectors, ListingExtractor};
use super::fetcher::{FetchError, PageFetcher};
use super::sources::SourceSpec;
use crate::types::{Listing, SearchQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build search URL: {0}")]
    Url(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// A job board that can be searched.
///
/// `try_search` keeps the failure reason for reporting; `search` is the
/// public contract and collapses every failure to an empty list.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<Listing>, SourceError>;

    async fn search(&self, query: &SearchQuery) -> Vec<Listing> {
        match self.try_search(query).await {
            Ok(listings) => listings,
            Err(e) => {
                warn!(source = self.name(), error = %e, "Source search failed, contributing no listings");
                Vec::new()
            }
        }
    }
}

/// Fetch + extract adapter driven entirely by a `SourceSpec`
pub struct ScrapingAdapter {
    spec: SourceSpec,
    extractor: ListingExtractor,
    fetcher: Arc<dyn PageFetcher>,
}

impl ScrapingAdapter {
    pub fn new(spec: SourceSpec, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let selectors = CompiledSelectors::compile(&spec.selectors)
            .with_context(|| format!("Invalid selectors for source {}", spec.name))?;
        let extractor = ListingExtractor::new(selectors, &spec.name, &spec.base_origin);

        Ok(Self {
            spec,
            extractor,
            fetcher,
        })
    }

    fn normalize(&self, listing: Listing) -> Listing {
        if listing.salary.is_empty() {
            Listing {
                salary: self.spec.salary_placeholder.clone(),
                ..listing
            }
        } else {
            listing
        }
    }
}

#[async_trait]
impl SourceAdapter for ScrapingAdapter {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn try_search(&self, query: &SearchQuery) -> Result<Vec<Listing>, SourceError> {
        let url = self
            .spec
            .search_url(query)
            .map_err(|e| SourceError::Url(e.to_string()))?;

        let html = self.fetcher.fetch(&url).await?;
        let extracted = self.extractor.extract(&html);
        let extracted_count = extracted.len();

        let listings: Vec<Listing> = extracted
            .into_iter()
            .map(|listing| self.normalize(listing))
            .filter(|listing| match &query.location {
                Some(location) => listing.location_matches(location),
                None => true,
            })
            .collect();

        info!(
            source = %self.spec.name,
            url = %url,
            extracted = extracted_count,
            kept = listings.len(),
            "Source search completed"
        );

        Ok(listings)
    }
}

/// Build one adapter per enabled source, all sharing the same fetcher
pub fn build_adapters(
    specs: &[SourceSpec],
    fetcher: Arc<dyn PageFetcher>,
) -> Result<Vec<Arc<dyn SourceAdapter>>> {
    specs
        .iter()
        .filter(|spec| spec.enabled)
        .map(|spec| {
            ScrapingAdapter::new(spec.clone(), fetcher.clone())
                .map(|adapter| Arc::new(adapter) as Arc<dyn SourceAdapter>)
        })
        .collect()
}
