use anyhow::Result;
use applymate::cli::{handle_command, Cli};
use applymate::logging::init_logging;
use applymate::AppConfig;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is read first so the log file setting applies
    let (config, load_report) = AppConfig::load_path(&cli.config)?;
    init_logging(config.log_file.as_deref())?;
    load_report.log();

    info!(
        environment = %load_report.environment,
        port = config.port,
        enrichment = config.gemini_api_key.is_some(),
        "ApplyMate starting"
    );

    handle_command(cli, config).await
}
