// src/enrichment/prompts.rs
use crate::types::{ExperienceLevel, Listing, SearchQuery};
use serde::Serialize;

#[derive(Serialize)]
struct PromptItem<'a> {
    index: usize,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    salary: &'a str,
    source: &'a str,
}

fn experience_label(level: Option<ExperienceLevel>) -> &'static str {
    match level {
        Some(ExperienceLevel::Fresher) => "fresher (0-1 years)",
        Some(ExperienceLevel::Junior) => "1-3 years",
        Some(ExperienceLevel::Mid) => "3-5 years",
        Some(ExperienceLevel::Senior) => "5+ years",
        None => "not specified",
    }
}

pub fn batch_prompt(batch: &[Listing], query: &SearchQuery) -> serde_json::Result<String> {
    let items: Vec<PromptItem<'_>> = batch
        .iter()
        .enumerate()
        .map(|(index, listing)| PromptItem {
            index,
            title: &listing.title,
            company: &listing.company,
            location: &listing.location,
            salary: &listing.salary,
            source: &listing.source,
        })
        .collect();
    let items_json = serde_json::to_string_pretty(&items)?;

    Ok(format!(
        r#"You are a career advisor ranking job listings for a candidate.

SEARCH QUERY: {query}
CANDIDATE EXPERIENCE: {experience}

JOB LISTINGS:
{items_json}

TASK: For every listing:
1. Identify the most relevant keywords in its title
2. Assign "matchScore", an integer from 0 to 100 for how well it fits the search query
3. Write "recommendations", 1-2 sentences of advice for applying
4. Assign "difficulty", one of "Easy", "Medium" or "Hard"

Return ONLY a JSON array with exactly one object per listing, sorted from best to worst match:
[{{"index": 0, "matchScore": 90, "recommendations": "...", "difficulty": "Medium", "keywords": ["..."]}}]
Use the "index" values given above. No text outside the array."#,
        query = query.query,
        experience = experience_label(query.experience),
    ))
}
