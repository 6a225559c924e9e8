//! Marquee CLI - Command-line interface
//!
//! Provides command-line access to movie search, discovery and the
//! interactive listing browser.

mod browse;
mod commands;
mod render;

use clap::Parser;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Search and browse movies from TMDB")]
struct Cli {
    /// Use the built-in offline catalog instead of TMDB
    #[arg(long, global = true)]
    demo: bool,
    /// Console log level; the full trace always goes to logs/
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: CliLogLevel,
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_level, None)?;

    commands::handle_command(cli.command, cli.demo).await?;

    Ok(())
}
