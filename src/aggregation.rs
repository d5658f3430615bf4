// src/aggregation.rs
use crate::scraping::SourceAdapter;
use crate::types::{Listing, SearchQuery};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one adapter within an aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub source: String,
    pub result: Result<usize, String>,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub listings: Vec<Listing>,
    pub outcomes: Vec<SourceOutcome>,
}

impl AggregateReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Fans a search out to every registered source and concatenates the
/// results in registration order.
#[derive(Clone)]
pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub async fn aggregate(&self, query: &SearchQuery) -> Vec<Listing> {
        self.aggregate_with_report(query).await.listings
    }

    pub async fn aggregate_with_report(&self, query: &SearchQuery) -> AggregateReport {
        // join_all yields results in input order, not completion order
        let results = join_all(
            self.adapters
                .iter()
                .map(|adapter| adapter.try_search(query)),
        )
        .await;

        let mut report = AggregateReport::default();

        for (adapter, result) in self.adapters.iter().zip(results) {
            let outcome = match result {
                Ok(listings) => {
                    let count = listings.len();
                    report.listings.extend(listings);
                    Ok(count)
                }
                Err(e) => {
                    warn!(source = adapter.name(), error = %e, "Source failed during aggregation");
                    Err(e.to_string())
                }
            };

            report.outcomes.push(SourceOutcome {
                source: adapter.name().to_string(),
                result: outcome,
            });
        }

        info!(
            query = %query.query,
            sources_ok = report.succeeded(),
            sources_failed = report.failed(),
            listings = report.listings.len(),
            "Aggregation finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::{FetchError, SourceError};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedAdapter {
        name: &'static str,
        delay_ms: u64,
        titles: Option<Vec<&'static str>>,
    }

    #[async_trait]
    impl SourceAdapter for FixedAdapter {
        fn name(&self) -> &str {
            self.name
        }

        async fn try_search(&self, _query: &SearchQuery) -> Result<Vec<Listing>, SourceError> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            match &self.titles {
                Some(titles) => Ok(titles
                    .iter()
                    .map(|t| Listing {
                        title: t.to_string(),
                        source: self.name.to_string(),
                        ..Default::default()
                    })
                    .collect()),
                None => Err(SourceError::Fetch(FetchError::Timeout)),
            }
        }
    }

    fn adapter(
        name: &'static str,
        delay_ms: u64,
        titles: Option<Vec<&'static str>>,
    ) -> Arc<dyn SourceAdapter> {
        Arc::new(FixedAdapter {
            name,
            delay_ms,
            titles,
        })
    }

    #[tokio::test]
    async fn test_results_follow_registration_order() {
        let aggregator = Aggregator::new(vec![
            adapter("slow", 40, Some(vec!["a1", "a2"])),
            adapter("fast", 0, Some(vec!["b1"])),
        ]);

        let listings = aggregator.aggregate(&SearchQuery::new("dev")).await;
        let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
    }

    #[tokio::test]
    async fn test_failing_source_does_not_block_others() {
        let aggregator = Aggregator::new(vec![
            adapter("down", 0, None),
            adapter("up", 5, Some(vec!["ok"])),
        ]);

        let report = aggregator
            .aggregate_with_report(&SearchQuery::new("dev"))
            .await;
        assert_eq!(report.listings.len(), 1);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.outcomes[0].source, "down");
        assert!(report.outcomes[0].result.is_err());
    }

    #[tokio::test]
    async fn test_sources_run_concurrently() {
        let aggregator = Aggregator::new(vec![
            adapter("a", 100, Some(vec!["a"])),
            adapter("b", 100, Some(vec!["b"])),
            adapter("c", 100, Some(vec!["c"])),
        ]);

        let started = std::time::Instant::now();
        let listings = aggregator.aggregate(&SearchQuery::new("dev")).await;
        assert_eq!(listings.len(), 3);
        assert!(started.elapsed() < Duration::from_millis(250));
    }
}
