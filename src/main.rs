use std::path::PathBuf;

use clap::Parser;
use url_alias::{config, logging, server};

/// URL alias service.
#[derive(Parser)]
#[command(name = "url-alias")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load environment variables from this file instead of `.env`.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Validate configuration, print a summary and exit.
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let config = config::load_from_env()?;

    logging::init(config.env)?;
    tracing::debug!("debug messages are enabled");

    config.print_summary();

    if cli.check_config {
        return Ok(());
    }

    let report = server::run(config).await?;

    if !report.is_clean() {
        tracing::warn!(?report, "shutdown finished with errors");
    }

    Ok(())
}
