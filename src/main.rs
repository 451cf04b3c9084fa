//! Strictly Chat Games - stdin chat driver
//!
//! Feeds chat lines from stdin to the checkers service and prints replies.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use strictly_chat_games::{DamesConfig, DamesService, SessionStore, Sweeper, SystemClock, respond};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    run(cli, config).await
}

/// Loads the config file, if any, and applies command-line overrides.
#[instrument(skip_all)]
fn load_config(cli: &Cli) -> Result<DamesConfig> {
    let base = match &cli.config {
        Some(path) => DamesConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            debug!("No config file given, using defaults");
            DamesConfig::default()
        }
    };
    Ok(base.with_overrides(cli.inactivity_timeout, cli.sweep_interval)?)
}

/// Reads chat lines until EOF or Ctrl-C.
#[instrument(skip_all, fields(chat = %cli.chat, json = cli.json))]
async fn run(cli: Cli, config: DamesConfig) -> Result<()> {
    let store = SessionStore::new(Arc::new(SystemClock));
    let service = DamesService::new(store.clone());
    let sweeper = Sweeper::spawn(store, config.sweep_interval(), config.inactivity_timeout());

    info!(
        inactivity_timeout_secs = config.inactivity_timeout_secs(),
        sweep_interval_secs = config.sweep_interval_secs(),
        "Ready for chat lines on stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                None
            }
        };
        let Some(line) = line else {
            break;
        };

        let Some((chat_id, reply)) = respond(&service, &cli.chat, &line) else {
            continue;
        };
        if cli.json {
            println!("{}", serde_json::to_string(&reply)?);
        } else {
            println!("[{chat_id}]\n{reply}\n");
        }
    }

    sweeper.stop().await;
    info!(sessions = service.store().len(), "Shutting down");
    Ok(())
}
