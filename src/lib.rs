// src/lib.rs
pub mod aggregation;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod fallback;
pub mod logging;
pub mod scraping;
pub mod search;
pub mod types;
pub mod utils;
pub mod web;

pub use aggregation::{AggregateReport, Aggregator, SourceOutcome};
pub use config::AppConfig;
pub use enrichment::{EnrichmentEngine, EnrichmentOptions, TextGenerator};
pub use fallback::FallbackCatalog;
pub use search::{SearchError, SearchService};
pub use types::{Difficulty, ExperienceLevel, Listing, SearchQuery, SearchRequest};
pub use web::{build_rocket, start_web_server};
