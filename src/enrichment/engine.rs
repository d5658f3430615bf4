// src/enrichment/engine.rs
use super::generator::TextGenerator;
use super::prompts::batch_prompt;
use crate::fallback::FallbackCatalog;
use crate::types::{Difficulty, Listing, SearchQuery};
use crate::utils::{strip_code_fences, truncate_chars};
use anyhow::Result;
use futures::future::join_all;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 5;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("generator call failed: {0}")]
    Generator(String),

    #[error("generator call timed out after {0:?}")]
    Timeout(Duration),

    #[error("response is not valid JSON: {0}")]
    Parse(String),

    #[error("response has unexpected shape: {0}")]
    Shape(String),
}

#[derive(Debug, Clone)]
pub struct EnrichmentOptions {
    pub batch_size: usize,
    pub timeout: Duration,
    /// Stable sort of the flattened result by match score
    pub rank_globally: bool,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: Duration::from_secs(30),
            rank_globally: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnnotation {
    index: usize,
    match_score: f64,
    recommendations: String,
    difficulty: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Annotation {
    index: usize,
    match_score: u8,
    recommendations: String,
    difficulty: Difficulty,
    keywords: Vec<String>,
}

/// Validate model output for a batch of `expected` listings. Any deviation
/// rejects the whole batch.
fn parse_annotations(text: &str, expected: usize) -> Result<Vec<Annotation>, EnrichmentError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| EnrichmentError::Parse(e.to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| EnrichmentError::Shape("top level is not an array".to_string()))?;

    if items.len() != expected {
        return Err(EnrichmentError::Shape(format!(
            "expected {} items, got {}",
            expected,
            items.len()
        )));
    }

    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| {
            let raw: RawAnnotation = serde_json::from_value(item.clone())
                .map_err(|e| EnrichmentError::Shape(e.to_string()))?;

            if raw.index >= expected || !seen.insert(raw.index) {
                return Err(EnrichmentError::Shape(format!(
                    "invalid or duplicate index {}",
                    raw.index
                )));
            }
            if !(0.0..=100.0).contains(&raw.match_score) {
                return Err(EnrichmentError::Shape(format!(
                    "matchScore {} out of range",
                    raw.match_score
                )));
            }
            let difficulty = Difficulty::parse(&raw.difficulty).ok_or_else(|| {
                EnrichmentError::Shape(format!("unknown difficulty {}", raw.difficulty))
            })?;

            Ok(Annotation {
                index: raw.index,
                match_score: raw.match_score.round() as u8,
                recommendations: raw.recommendations.trim().to_string(),
                difficulty,
                keywords: raw.keywords,
            })
        })
        .collect()
}

/// Build the enriched batch, best match first
fn apply_annotations(batch: &[Listing], mut annotations: Vec<Annotation>) -> Vec<Listing> {
    annotations.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    annotations
        .into_iter()
        .map(|a| {
            let keywords = (!a.keywords.is_empty()).then_some(a.keywords);
            batch[a.index].with_annotations(a.match_score, a.difficulty, a.recommendations, keywords)
        })
        .collect()
}

pub struct EnrichmentEngine {
    generator: Option<Arc<dyn TextGenerator>>,
    catalog: FallbackCatalog,
    options: EnrichmentOptions,
}

impl EnrichmentEngine {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        catalog: FallbackCatalog,
        options: EnrichmentOptions,
    ) -> Self {
        Self {
            generator,
            catalog,
            options,
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Score and annotate listings. Empty input is answered from the fallback
    /// catalog; only a catalog failure is reported as an error.
    pub async fn enrich(&self, listings: Vec<Listing>, query: &SearchQuery) -> Result<Vec<Listing>> {
        if listings.is_empty() {
            info!(query = %query.query, "No live listings, using fallback catalog");
            return self.catalog.fallback(&query.query, query.experience);
        }

        let Some(generator) = &self.generator else {
            debug!("Enrichment unavailable, applying default annotations");
            return Ok(listings.iter().map(Listing::with_default_annotations).collect());
        };

        let batch_size = self.options.batch_size.max(1);
        let batches: Vec<&[Listing]> = listings.chunks(batch_size).collect();

        let results = join_all(
            batches
                .iter()
                .map(|batch| self.enrich_batch(generator.as_ref(), batch, query)),
        )
        .await;

        let mut enriched: Vec<Listing> = results.into_iter().flatten().collect();

        if self.options.rank_globally {
            // Stable: ties and unenriched listings keep batch order
            enriched.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        }

        Ok(enriched)
    }

    async fn enrich_batch(
        &self,
        generator: &dyn TextGenerator,
        batch: &[Listing],
        query: &SearchQuery,
    ) -> Vec<Listing> {
        match self.try_enrich_batch(generator, batch, query).await {
            Ok(enriched) => enriched,
            Err(e) => {
                warn!(error = %e, batch_len = batch.len(), "Batch enrichment failed, keeping original listings");
                batch.to_vec()
            }
        }
    }

    async fn try_enrich_batch(
        &self,
        generator: &dyn TextGenerator,
        batch: &[Listing],
        query: &SearchQuery,
    ) -> Result<Vec<Listing>, EnrichmentError> {
        let prompt = batch_prompt(batch, query)?;

        let text = tokio::time::timeout(self.options.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| EnrichmentError::Timeout(self.options.timeout))?
            .map_err(|e| EnrichmentError::Generator(e.to_string()))?;

        let annotations = parse_annotations(&text, batch.len()).inspect_err(|e| {
            debug!(error = %e, response = truncate_chars(&text, 200), "Rejected enrichment response");
        })?;

        Ok(apply_annotations(batch, annotations))
    }
}
