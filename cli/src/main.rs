//! Approle - Main Entry Point

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use approle_cli::cli::Cli;
use approle_cli::config::Config;
use approle_cli::graph::GraphClient;
use approle_cli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        graph = %config.graph_base_url,
        dry_run = cli.dry_run,
        "Starting approle"
    );

    let client = GraphClient::connect(&config)
        .await
        .context("Failed to connect to Microsoft Graph")?;

    let lines = cli
        .command
        .execute(&client, cli.dry_run)
        .await
        .context("Directory request failed")?;
    for line in lines {
        println!("{line}");
    }

    Ok(())
}
