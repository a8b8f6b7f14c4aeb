mod config;
mod dashboard;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use config::{CliConfig, Config};
use market_analyzer::TARGET_GAME;
use std::io;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CliConfig::parse();

    generate_report(&config)?;

    info!("Report generated successfully");

    Ok(())
}

fn generate_report<C: Config>(config: &C) -> Result<()> {
    let report = market_analyzer::analyze(config.input_path())?;

    output::write_artifacts(config.output_dir(), &report)
        .context("Failed to write report artifacts")?;
    dashboard::write_page(config.dashboard_path(), TARGET_GAME, config.output_dir())
        .context("Failed to write dashboard page")?;

    Ok(())
}
