// src/enrichment/mod.rs
pub mod engine;
pub mod generator;
pub mod prompts;

pub use engine::{EnrichmentEngine, EnrichmentError, EnrichmentOptions, DEFAULT_BATCH_SIZE};
pub use generator::{GeminiClient, TextGenerator};
