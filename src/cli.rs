//! Command-line interface for strictly_chat_games.

use clap::Parser;
use std::path::PathBuf;

/// Strictly Chat Games - checkers for chat sessions, one game per chat
///
/// Reads chat lines from stdin. Prefix a line with `<chat-id>:` to address a
/// particular chat; other lines go to the default chat.
#[derive(Parser, Debug)]
#[command(name = "strictly_chat_games")]
#[command(about = "Session-scoped checkers driven by chat commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds of inactivity before a session is evicted (overrides config)
    #[arg(long)]
    pub inactivity_timeout: Option<u64>,

    /// Seconds between inactivity sweeps (overrides config)
    #[arg(long)]
    pub sweep_interval: Option<u64>,

    /// Print replies as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Chat id for lines without a `<chat-id>:` prefix
    #[arg(long, default_value = "local")]
    pub chat: String,
}
