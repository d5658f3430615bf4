// src/cli.rs
use crate::config::{AppConfig, CONFIG_FILE};
use crate::search::SearchService;
use crate::types::{Listing, SearchRequest};
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "applymate")]
#[command(about = "Aggregate, score and rank job listings from several job boards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one search and print the ranked listings
    Search {
        query: String,
        #[arg(long)]
        location: Option<String>,
        /// fresher, 0-1, 1-3, 3-5 or 5+
        #[arg(long)]
        experience: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    company: &'a str,
    location: &'a str,
    salary: &'a str,
    source: &'a str,
    match_score: Option<u8>,
    difficulty: String,
    link: &'a str,
    keywords: String,
}

impl<'a> From<&'a Listing> for CsvRow<'a> {
    fn from(listing: &'a Listing) -> Self {
        Self {
            title: &listing.title,
            company: &listing.company,
            location: &listing.location,
            salary: &listing.salary,
            source: &listing.source,
            match_score: listing.match_score,
            difficulty: listing
                .difficulty
                .map(|d| d.to_string())
                .unwrap_or_default(),
            link: &listing.link,
            keywords: listing.keywords.as_deref().unwrap_or_default().join("; "),
        }
    }
}

pub fn write_listings<W: Write>(listings: &[Listing], format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(out, listings).context("Failed to write JSON output")?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for listing in listings {
                writer
                    .serialize(CsvRow::from(listing))
                    .context("Failed to write CSV row")?;
            }
            writer.flush().context("Failed to flush CSV output")?;
        }
    }
    Ok(())
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            let service = SearchService::from_config(&config)?;
            start_web_server(service, port.unwrap_or(config.port)).await
        }
        Command::Search {
            query,
            location,
            experience,
            format,
        } => {
            let service = SearchService::from_config(&config)?;
            let request = SearchRequest {
                query: Some(query),
                location,
                experience,
            };

            let listings = service.search(request).await?;
            write_listings(&listings, format, std::io::stdout().lock())?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn listing() -> Listing {
        Listing {
            title: "Rust Engineer".to_string(),
            company: "Acme, Inc".to_string(),
            location: "Remote".to_string(),
            salary: "Not specified".to_string(),
            link: "https://example.com/1".to_string(),
            source: "Naukri".to_string(),
            match_score: Some(90),
            difficulty: Some(Difficulty::Hard),
            recommendations: None,
            keywords: Some(vec!["rust".to_string(), "tokio".to_string()]),
        }
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        write_listings(&[listing()], OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "title,company,location,salary,source,match_score,difficulty,link,keywords"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Rust Engineer,\"Acme, Inc\",Remote,Not specified,Naukri,90,Hard,https://example.com/1,rust; tokio"
        );
    }

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::parse_from([
            "applymate",
            "search",
            "Data Analyst",
            "--location",
            "Pune",
            "--format",
            "csv",
        ]);
        match cli.command {
            Some(Command::Search {
                query,
                location,
                format,
                ..
            }) => {
                assert_eq!(query, "Data Analyst");
                assert_eq!(location.as_deref(), Some("Pune"));
                assert!(matches!(format, OutputFormat::Csv));
            }
            _ => panic!("expected search command"),
        }
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }
}
