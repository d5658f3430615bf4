// src/fallback.rs
//! Curated listings returned when live aggregation finds nothing

use crate::scraping::Separator;
use crate::types::{Difficulty, ExperienceLevel, Listing};
use crate::utils::slugify_query;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub const FALLBACK_SOURCE: &str = "ApplyMate";

/// One catalog template. `{query}` in `title`, `link` and
/// `recommendations` is replaced with the searched query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(default)]
    pub link: String,
    /// How the query's words are joined inside `link`
    #[serde(default = "default_link_separator")]
    pub link_separator: Separator,
    pub match_score: u8,
    pub difficulty: Difficulty,
    pub recommendations: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_link_separator() -> Separator {
    Separator::Percent
}

impl CatalogEntry {
    fn with_link_separator(self, link_separator: Separator) -> Self {
        Self {
            link_separator,
            ..self
        }
    }

    fn render(&self, query: &str) -> Listing {
        Listing {
            title: self.title.replace("{query}", query),
            company: self.company.clone(),
            location: self.location.clone(),
            salary: self.salary.clone(),
            link: self.link.replace("{query}", &slugify_query(query, self.link_separator.as_str())),
            source: FALLBACK_SOURCE.to_string(),
            match_score: Some(self.match_score.min(100)),
            recommendations: Some(self.recommendations.replace("{query}", query)),
            difficulty: Some(self.difficulty),
            keywords: Some(self.keywords.clone()),
        }
    }

    fn suits_entry_level(&self) -> bool {
        let title = self.title.to_lowercase();
        title.contains("intern") || title.contains("junior") || self.difficulty == Difficulty::Easy
    }

    fn suits_senior(&self) -> bool {
        self.title.to_lowercase().contains("senior") || self.difficulty == Difficulty::Hard
    }
}

pub trait CatalogProvider: Send + Sync {
    fn entries(&self) -> Result<Vec<CatalogEntry>>;
}

/// The compiled-in catalog
pub struct BuiltinCatalog;

impl CatalogProvider for BuiltinCatalog {
    fn entries(&self) -> Result<Vec<CatalogEntry>> {
        Ok(builtin_entries())
    }
}

/// A TOML catalog re-read on every use, so edits apply without a restart
pub struct TomlCatalog {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    entries: Vec<CatalogEntry>,
}

impl TomlCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CatalogProvider for TomlCatalog {
    fn entries(&self) -> Result<Vec<CatalogEntry>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read fallback catalog: {}", self.path.display()))?;
        let file: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse fallback catalog: {}", self.path.display()))?;
        Ok(file.entries)
    }
}

#[derive(Clone)]
pub struct FallbackCatalog {
    provider: Arc<dyn CatalogProvider>,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinCatalog))
    }
}

impl FallbackCatalog {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub fn fallback(&self, query: &str, experience: Option<ExperienceLevel>) -> Result<Vec<Listing>> {
        let entries = self.provider.entries()?;

        let filtered: Vec<&CatalogEntry> = match experience {
            Some(level) if level.is_entry_level() => {
                entries.iter().filter(|e| e.suits_entry_level()).collect()
            }
            Some(level) if level.is_senior() => entries.iter().filter(|e| e.suits_senior()).collect(),
            _ => entries.iter().collect(),
        };

        // A filter that matches nothing must not leave the caller empty-handed
        let selected = if filtered.is_empty() {
            entries.iter().collect()
        } else {
            filtered
        };

        Ok(selected.into_iter().map(|e| e.render(query)).collect())
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    title: &str,
    company: &str,
    location: &str,
    salary: &str,
    link: &str,
    match_score: u8,
    difficulty: Difficulty,
    recommendations: &str,
    keywords: &[&str],
) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary: salary.to_string(),
        link: link.to_string(),
        link_separator: default_link_separator(),
        match_score,
        difficulty,
        recommendations: recommendations.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        entry(
            "{query} Intern",
            "TechStart Labs",
            "Remote",
            "₹15,000 - ₹25,000 / month",
            "https://internshala.com/internships/keywords-{query}",
            88,
            Difficulty::Easy,
            "A good first step: highlight coursework and personal projects related to {query}.",
            &["internship", "entry level", "learning"],
        )
        .with_link_separator(Separator::Hyphen),
        entry(
            "Junior {query}",
            "Innovate Solutions",
            "Bangalore, India",
            "₹3 - 6 LPA",
            "https://www.linkedin.com/jobs/search?keywords=junior%20{query}",
            85,
            Difficulty::Easy,
            "Show one or two concrete projects and the tools you used to build them.",
            &["junior", "fresher friendly", "mentorship"],
        ),
        entry(
            "{query}",
            "Global Systems Inc",
            "Hyderabad, India",
            "₹6 - 12 LPA",
            "https://in.indeed.com/jobs?q={query}",
            82,
            Difficulty::Medium,
            "Quantify the impact of your past work and match the keywords in the posting.",
            &["full time", "mid level"],
        ),
        entry(
            "{query} - Product Team",
            "CloudScale Technologies",
            "Pune, India",
            "₹8 - 14 LPA",
            "https://www.naukri.com/{query}-jobs",
            78,
            Difficulty::Medium,
            "Emphasise cross-functional collaboration and ownership of shipped features.",
            &["product", "collaboration"],
        )
        .with_link_separator(Separator::Hyphen),
        entry(
            "Senior {query}",
            "Enterprise Corp",
            "Mumbai, India",
            "₹18 - 30 LPA",
            "https://www.linkedin.com/jobs/search?keywords=senior%20{query}",
            80,
            Difficulty::Hard,
            "Lead with system design decisions and the teams you have mentored.",
            &["senior", "leadership", "architecture"],
        ),
        entry(
            "Lead {query}",
            "NextGen Analytics",
            "Remote",
            "₹30 - 45 LPA",
            "https://www.naukri.com/lead-{query}-jobs",
            72,
            Difficulty::Hard,
            "Prepare examples of roadmaps you owned and how you grew the people around you.",
            &["lead", "strategy", "remote"],
        )
        .with_link_separator(Separator::Hyphen),
    ]
}
