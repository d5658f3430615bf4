// src/scraping/mod.rs
pub mod adapter;
pub mod extractor;
pub mod fetcher;
pub mod sources;

pub use adapter::{build_adapters, ScrapingAdapter, SourceAdapter, SourceError};
pub use extractor::{CompiledSelectors, ListingExtractor};
pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use sources::{builtin_sources, Separator, SelectorSet, SourceSpec, UrlSpec};
