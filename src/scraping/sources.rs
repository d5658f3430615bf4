// src/scraping/sources.rs
//! Per-board search configuration. Each job board is plain data: how to
//! build its search URL and which selectors locate its listing cards.

use crate::types::{ExperienceLevel, SearchQuery};
use crate::utils::slugify_query;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    Hyphen,
    Plus,
    Percent,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hyphen => "-",
            Self::Plus => "+",
            Self::Percent => "%20",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlSpec {
    /// Search URL with `{query}` and `{location}` placeholders
    pub template: String,
    pub separator: Separator,
    /// Replaces `{location}` when a location is requested; `None` when the
    /// board cannot filter by location in the URL
    #[serde(default)]
    pub location_fragment: Option<String>,
    #[serde(default)]
    pub experience_param: Option<String>,
    #[serde(default)]
    pub experience_values: BTreeMap<ExperienceLevel, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSet {
    pub card: String,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    /// Element carrying the link; the card itself when absent
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "default_link_attr")]
    pub link_attr: String,
    #[serde(default)]
    pub require_title: bool,
}

fn default_link_attr() -> String {
    "href".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_salary_placeholder() -> String {
    "Not specified".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub base_origin: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_salary_placeholder")]
    pub salary_placeholder: String,
    pub url: UrlSpec,
    pub selectors: SelectorSet,
}

impl SourceSpec {
    pub fn search_url(&self, query: &SearchQuery) -> Result<String> {
        let separator = self.url.separator.as_str();

        let location = match (&query.location, &self.url.location_fragment) {
            (Some(location), Some(fragment)) => {
                fragment.replace("{location}", &slugify_query(location, separator))
            }
            _ => String::new(),
        };

        let raw = self
            .url
            .template
            .replace("{query}", &slugify_query(&query.query, separator))
            .replace("{location}", &location);

        let mut url = Url::parse(&raw)
            .with_context(|| format!("Invalid search URL for {}: {}", self.name, raw))?;

        let experience_value = query.experience.and_then(|level| {
            self.url
                .experience_param
                .as_ref()
                .zip(self.url.experience_values.get(&level))
        });
        if let Some((param, value)) = experience_value {
            url.query_pairs_mut().append_pair(param, value);
        }

        Ok(url.to_string())
    }
}

fn experience_map(entries: &[(ExperienceLevel, &str)]) -> BTreeMap<ExperienceLevel, String> {
    entries
        .iter()
        .map(|(level, value)| (*level, value.to_string()))
        .collect()
}

fn selector(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// The boards searched when the configuration does not list its own
pub fn builtin_sources() -> Vec<SourceSpec> {
    use ExperienceLevel::*;

    vec![
        SourceSpec {
            name: "Naukri".to_string(),
            base_origin: "https://www.naukri.com".to_string(),
            enabled: true,
            salary_placeholder: "Not specified".to_string(),
            url: UrlSpec {
                template: "https://www.naukri.com/{query}-jobs{location}".to_string(),
                separator: Separator::Hyphen,
                location_fragment: selector("-in-{location}"),
                experience_param: selector("experience"),
                experience_values: experience_map(&[(Fresher, "0"), (Junior, "1"), (Mid, "3"), (Senior, "5")]),
            },
            selectors: SelectorSet {
                card: "div.srp-jobtuple-wrapper, article.jobTuple".to_string(),
                title: "a.title".to_string(),
                company: selector("a.comp-name, a.subTitle"),
                location: selector("span.locWdth, li.location span"),
                salary: selector("span.sal-wrap span, li.salary span"),
                link: selector("a.title"),
                link_attr: default_link_attr(),
                require_title: true,
            },
        },
        SourceSpec {
            name: "Indeed".to_string(),
            base_origin: "https://in.indeed.com".to_string(),
            enabled: true,
            salary_placeholder: "Not specified".to_string(),
            url: UrlSpec {
                template: "https://in.indeed.com/jobs?q={query}{location}".to_string(),
                separator: Separator::Plus,
                location_fragment: selector("&l={location}"),
                experience_param: selector("explvl"),
                experience_values: experience_map(&[
                    (Fresher, "entry_level"),
                    (Mid, "mid_level"),
                    (Senior, "senior_level"),
                ]),
            },
            selectors: SelectorSet {
                card: "div.job_seen_beacon".to_string(),
                title: "h2.jobTitle span".to_string(),
                company: selector("span[data-testid='company-name']"),
                location: selector("div[data-testid='text-location']"),
                salary: selector("div.salary-snippet-container"),
                link: selector("h2.jobTitle a"),
                link_attr: default_link_attr(),
                require_title: true,
            },
        },
        SourceSpec {
            name: "LinkedIn".to_string(),
            base_origin: "https://www.linkedin.com".to_string(),
            enabled: true,
            salary_placeholder: "Check on source site".to_string(),
            url: UrlSpec {
                template: "https://www.linkedin.com/jobs/search?keywords={query}{location}".to_string(),
                separator: Separator::Percent,
                location_fragment: selector("&location={location}"),
                experience_param: selector("f_E"),
                experience_values: experience_map(&[(Fresher, "2"), (Junior, "3"), (Mid, "4"), (Senior, "4")]),
            },
            selectors: SelectorSet {
                card: "div.base-card".to_string(),
                title: "h3.base-search-card__title".to_string(),
                company: selector("h4.base-search-card__subtitle"),
                location: selector("span.job-search-card__location"),
                salary: selector("span.job-search-card__salary-info"),
                link: selector("a.base-card__full-link"),
                link_attr: default_link_attr(),
                require_title: true,
            },
        },
        SourceSpec {
            name: "Internshala".to_string(),
            base_origin: "https://internshala.com".to_string(),
            enabled: true,
            salary_placeholder: "Not specified".to_string(),
            url: UrlSpec {
                template: "https://internshala.com/internships/{query}-internship{location}".to_string(),
                separator: Separator::Hyphen,
                location_fragment: selector("-in-{location}"),
                experience_param: None,
                experience_values: BTreeMap::new(),
            },
            selectors: SelectorSet {
                card: "div.individual_internship".to_string(),
                title: "h3.job-internship-name, h3.heading_4_5".to_string(),
                company: selector("p.company-name, h4.company_name"),
                location: selector("div.locations span a, p.locations span"),
                salary: selector("span.stipend"),
                link: selector("a.job-title-href, h3 a"),
                link_attr: default_link_attr(),
                require_title: false,
            },
        },
        SourceSpec {
            name: "TimesJobs".to_string(),
            base_origin: "https://www.timesjobs.com".to_string(),
            enabled: true,
            salary_placeholder: "Check on source site".to_string(),
            url: UrlSpec {
                template: "https://www.timesjobs.com/candidate/job-search.html?searchType=personalizedSearch&from=submit&txtKeywords={query}{location}".to_string(),
                separator: Separator::Plus,
                location_fragment: selector("&txtLocation={location}"),
                experience_param: selector("cboWorkExp1"),
                experience_values: experience_map(&[(Fresher, "0"), (Junior, "1"), (Mid, "3"), (Senior, "5")]),
            },
            selectors: SelectorSet {
                card: "li.job-bx".to_string(),
                title: "h2 a".to_string(),
                company: selector("h3.joblist-comp-name"),
                location: selector("ul.top-jd-dtl li span"),
                salary: None,
                link: selector("h2 a"),
                link_attr: default_link_attr(),
                require_title: false,
            },
        },
    ]
}
