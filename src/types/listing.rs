// src/types/listing.rs
//! Job listing records shared by every stage of the search pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MATCH_SCORE: u8 = 75;
pub const DEFAULT_RECOMMENDATION: &str =
    "Review the full posting and tailor your resume to the skills it lists before applying.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse the difficulty labels accepted from model output, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// One job posting found on one source.
///
/// Adapters produce listings with only the scraped fields set; enrichment and
/// the fallback catalog fill the optional annotations by building new values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub link: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Listing {
    pub fn with_annotations(
        &self,
        match_score: u8,
        difficulty: Difficulty,
        recommendations: String,
        keywords: Option<Vec<String>>,
    ) -> Self {
        Self {
            match_score: Some(match_score.min(100)),
            difficulty: Some(difficulty),
            recommendations: Some(recommendations),
            keywords,
            ..self.clone()
        }
    }

    /// Annotations used when no generator is configured
    pub fn with_default_annotations(&self) -> Self {
        self.with_annotations(
            DEFAULT_MATCH_SCORE,
            Difficulty::Medium,
            DEFAULT_RECOMMENDATION.to_string(),
            self.keywords.clone(),
        )
    }

    pub fn location_matches(&self, wanted: &str) -> bool {
        self.location
            .to_lowercase()
            .contains(&wanted.trim().to_lowercase())
    }
}
