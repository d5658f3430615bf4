// src/search.rs
use crate::aggregation::Aggregator;
use crate::config::AppConfig;
use crate::enrichment::{EnrichmentEngine, EnrichmentOptions, GeminiClient, TextGenerator};
use crate::fallback::{BuiltinCatalog, CatalogProvider, FallbackCatalog, TomlCatalog};
use crate::scraping::{build_adapters, HttpFetcher};
use crate::types::{Listing, SearchQuery, SearchRequest};
use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Request-scoped job search: aggregate, then enrich or fall back
#[derive(Clone)]
pub struct SearchService {
    aggregator: Aggregator,
    engine: Arc<EnrichmentEngine>,
}

impl SearchService {
    pub fn new(aggregator: Aggregator, engine: EnrichmentEngine) -> Self {
        Self {
            aggregator,
            engine: Arc::new(engine),
        }
    }

    /// Wire the production pipeline: HTTP scraping adapters, Gemini when an
    /// API key is configured, and the configured fallback catalog
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout())?);
        let adapters = build_adapters(&config.source_specs(), fetcher)?;
        let aggregator = Aggregator::new(adapters);

        let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
            Some(api_key) => Some(Arc::new(GeminiClient::new(
                api_key.clone(),
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
                config.enrichment_timeout(),
            )?)),
            None => {
                warn!("GEMINI_API_KEY not set, listings will get default scores");
                None
            }
        };

        let provider: Arc<dyn CatalogProvider> = match &config.fallback_catalog {
            Some(path) => Arc::new(TomlCatalog::new(path.clone())),
            None => Arc::new(BuiltinCatalog),
        };

        let options = EnrichmentOptions {
            batch_size: config.batch_size,
            timeout: config.enrichment_timeout(),
            rank_globally: config.rank_globally,
        };

        info!(
            sources = ?aggregator.source_names(),
            enrichment = generator.is_some(),
            "Search pipeline ready"
        );

        Ok(Self::new(
            aggregator,
            EnrichmentEngine::new(generator, FallbackCatalog::new(provider), options),
        ))
    }

    pub fn enrichment_available(&self) -> bool {
        self.engine.is_available()
    }

    pub async fn search(&self, request: SearchRequest) -> Result<Vec<Listing>, SearchError> {
        let query = SearchQuery::try_from(request).map_err(SearchError::InvalidRequest)?;
        self.search_query(&query).await
    }

    pub async fn search_query(&self, query: &SearchQuery) -> Result<Vec<Listing>, SearchError> {
        let report = self.aggregator.aggregate_with_report(query).await;
        let used_fallback = report.listings.is_empty();
        let (sources_ok, sources_failed) = (report.succeeded(), report.failed());

        let jobs = self
            .engine
            .enrich(report.listings, query)
            .await
            .inspect_err(|e| error!(query = %query.query, error = %e, "Job search failed"))?;

        info!(
            query = %query.query,
            location = query.location.as_deref().unwrap_or(""),
            sources_ok,
            sources_failed,
            jobs = jobs.len(),
            fallback = used_fallback,
            enriched = self.engine.is_available(),
            "Job search completed"
        );

        Ok(jobs)
    }
}
