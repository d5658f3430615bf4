// src/config.rs
use crate::enrichment::generator::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::enrichment::DEFAULT_BATCH_SIZE;
use crate::scraping::{builtin_sources, SourceSpec};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub port: u16,
    pub fetch_timeout_secs: u64,
    pub enrichment_timeout_secs: u64,
    pub batch_size: usize,
    pub rank_globally: bool,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// Only read from the environment, never from the config file
    #[serde(skip)]
    pub gemini_api_key: Option<String>,
    pub fallback_catalog: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    /// Replaces the built-in job board table when present
    pub sources: Option<Vec<SourceSpec>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            fetch_timeout_secs: 15,
            enrichment_timeout_secs: 30,
            batch_size: DEFAULT_BATCH_SIZE,
            rank_globally: true,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_key: None,
            fallback_catalog: None,
            log_file: None,
            sources: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<AppConfig>,
    #[serde(default)]
    production: Option<AppConfig>,
}

/// What loading found, kept so it can be logged once the subscriber is up
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub environment: String,
    pub path: PathBuf,
    pub file_found: bool,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn log(&self) {
        info!(
            environment = %self.environment,
            path = %self.path.display(),
            "Loaded configuration"
        );
        if !self.file_found {
            warn!("{} not found, using default configuration", self.path.display());
        }
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

impl AppConfig {
    /// Load the current environment's section of `path`, then apply
    /// environment variable overrides. Nothing is logged here; call
    /// `LoadReport::log` after logging is initialized.
    pub fn load_path(path: &Path) -> Result<(Self, LoadReport)> {
        let environment = Self::get_environment();

        let mut config = Self::load_from(path, &environment)?;
        let warnings = config.apply_overrides(|key| std::env::var(key).ok());

        let report = LoadReport {
            environment,
            path: path.to_path_buf(),
            file_found: path.exists(),
            warnings,
        };
        Ok((config, report))
    }

    pub fn get_environment() -> String {
        std::env::var("APPLYMATE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// A missing file yields the defaults
    pub fn load_from(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section.unwrap_or_default())
    }

    /// Returns a warning for every override that was present but ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.gemini_api_key = Some(key.trim().to_string());
        }
        if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
            self.gemini_model = model;
        }
        match lookup("ROCKET_PORT").map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => self.port = port,
            Some(Err(_)) => warnings.push(format!(
                "ROCKET_PORT is not a valid port number, keeping {}",
                self.port
            )),
            None => {}
        }

        warnings
    }

    pub fn source_specs(&self) -> Vec<SourceSpec> {
        self.sources.clone().unwrap_or_else(builtin_sources)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }
}
