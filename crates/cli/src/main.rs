//! Retail Analytics Copilot CLI
//!
//! Main entry point for the copilot command-line tool. Answers analytics
//! questions over a document corpus and a SQLite store, one at a time or
//! in JSONL batches.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, BatchCommand, InitCommand};
use copilot_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Retail Analytics Copilot - hybrid document/SQL question answering
#[derive(Parser, Debug)]
#[command(name = "copilot")]
#[command(about = "Hybrid document/SQL question answering over retail data", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing the document corpus
    #[arg(short = 'd', long, global = true, env = "COPILOT_DOCS")]
    docs: Option<PathBuf>,

    /// Path to the SQLite database
    #[arg(short = 'b', long, global = true, env = "COPILOT_DB")]
    db: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "COPILOT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question interactively
    Ask(AskCommand),

    /// Process a JSONL batch of questions
    Batch(BatchCommand),

    /// Bootstrap the convenience views in the database
    Init(InitCommand),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load base configuration, then apply CLI overrides
    let config = AppConfig::load()?;
    let config = config.with_overrides(
        cli.docs,
        cli.db,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Retail Analytics Copilot starting");
    tracing::debug!("Docs dir: {:?}", config.docs_dir);
    tracing::debug!("Database: {:?}", config.db_path);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Batch(_) => "batch",
        Commands::Init(_) => "init",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config),
        Commands::Batch(cmd) => cmd.execute(&config),
        Commands::Init(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
