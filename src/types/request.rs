// src/types/request.rs
use serde::{Deserialize, Serialize};

/// Coarse experience buckets understood by every source adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Fresher,
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Parse the free-text experience field; unknown values mean "no filter"
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        match normalized.as_str() {
            "fresher" | "0-1" | "0-1years" | "entry" | "entrylevel" | "intern" => {
                Some(Self::Fresher)
            }
            "1-3" | "1-3years" | "junior" => Some(Self::Junior),
            "3-5" | "3-5years" | "mid" => Some(Self::Mid),
            "5+" | "5+years" | "5-10" | "10+" | "senior" => Some(Self::Senior),
            _ => None,
        }
    }

    pub fn is_entry_level(self) -> bool {
        self == Self::Fresher
    }

    pub fn is_senior(self) -> bool {
        self == Self::Senior
    }
}

/// Body of `POST /api/jobs-search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

/// A validated search request: the query is non-blank, blank optional
/// fields are dropped and experience is parsed into a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub location: Option<String>,
    pub experience: Option<ExperienceLevel>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: None,
            experience: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(Some(location.into()));
        self
    }

    pub fn with_experience(mut self, experience: ExperienceLevel) -> Self {
        self.experience = Some(experience);
        self
    }
}

impl TryFrom<SearchRequest> for SearchQuery {
    type Error = String;

    fn try_from(request: SearchRequest) -> Result<Self, Self::Error> {
        let query = non_blank(request.query).ok_or_else(|| "Search query is required".to_string())?;

        Ok(Self {
            query,
            location: non_blank(request.location),
            experience: request.experience.as_deref().and_then(ExperienceLevel::parse),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_parse() {
        assert_eq!(ExperienceLevel::parse("fresher"), Some(ExperienceLevel::Fresher));
        assert_eq!(ExperienceLevel::parse("0 - 1"), Some(ExperienceLevel::Fresher));
        assert_eq!(ExperienceLevel::parse("1-3"), Some(ExperienceLevel::Junior));
        assert_eq!(ExperienceLevel::parse("3-5 years"), Some(ExperienceLevel::Mid));
        assert_eq!(ExperienceLevel::parse("5+"), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::parse("whatever"), None);
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let request = SearchRequest {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(SearchQuery::try_from(request).is_err());
        assert!(SearchQuery::try_from(SearchRequest::default()).is_err());
    }

    #[test]
    fn test_request_is_normalized() {
        let request = SearchRequest {
            query: Some(" Software Engineer ".to_string()),
            location: Some("  ".to_string()),
            experience: Some("5+".to_string()),
        };
        let query = SearchQuery::try_from(request).unwrap();
        assert_eq!(query.query, "Software Engineer");
        assert_eq!(query.location, None);
        assert_eq!(query.experience, Some(ExperienceLevel::Senior));
    }
}
