// src/types/mod.rs
pub mod listing;
pub mod request;

pub use listing::{Difficulty, Listing, DEFAULT_MATCH_SCORE, DEFAULT_RECOMMENDATION};
pub use request::{ExperienceLevel, SearchQuery, SearchRequest};
