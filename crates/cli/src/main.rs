//! promptd CLI
//!
//! Main entry point for the promptd command-line tool: a cache-backed query
//! and composition surface over a Notion-hosted prompt library.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    CategoriesCommand, CategoryCommand, ComposeCommand, GetCommand, ListCommand, RefreshCommand,
    SearchCommand,
};
use promptd_core::{config::AppConfig, logging, AppError, AppResult};
use std::path::PathBuf;

/// promptd - query and compose prompts from a Notion-hosted library
#[derive(Parser, Debug)]
#[command(name = "promptd")]
#[command(about = "Query and compose prompts from a Notion-hosted library", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTD_CONFIG")]
    config: Option<PathBuf>,

    /// Cache expiry in milliseconds (floor: 1000)
    #[arg(long, global = true, env = "PROMPTD_CACHE_TTL_MS")]
    cache_ttl_ms: Option<u64>,

    /// Default handling mode (return-only, process-locally, call-external-api)
    #[arg(long, global = true, env = "PROMPTD_HANDLING_MODE")]
    handling_mode: Option<String>,

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
    /// List prompts (optionally paginated)
    List(ListCommand),

    /// Fetch a single prompt by name or id
    Get(GetCommand),

    /// Search prompts by name, description, or content
    Search(SearchCommand),

    /// Filter prompts by category label
    Category(CategoryCommand),

    /// List every known category label
    Categories(CategoriesCommand),

    /// Compose a prompt template with user input
    Compose(ComposeCommand),

    /// Force a cache refresh from the upstream store
    Refresh(RefreshCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.cache_ttl_ms,
        cli.handling_mode,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("promptd starting");
    tracing::debug!("Cache expiry: {}ms", config.cache_ttl_ms);
    tracing::debug!("Handling mode: {}", config.handling_mode);

    // Missing connector credentials are fatal before any command runs
    config.validate()?;

    let command_name = match &cli.command {
        Commands::List(_) => "list",
        Commands::Get(_) => "get",
        Commands::Search(_) => "search",
        Commands::Category(_) => "category",
        Commands::Categories(_) => "categories",
        Commands::Compose(_) => "compose",
        Commands::Refresh(_) => "refresh",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::List(cmd) => cmd.execute(&config).await,
        Commands::Get(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Category(cmd) => cmd.execute(&config).await,
        Commands::Categories(cmd) => cmd.execute(&config).await,
        Commands::Compose(cmd) => cmd.execute(&config).await,
        Commands::Refresh(cmd) => cmd.execute(&config).await,
    };

    // Operation-level failures still produce a structured payload on stdout
    match result {
        Ok(()) => {
            tracing::info!("Command completed successfully");
            Ok(())
        }
        Err(error) => {
            tracing::error!("Command failed: {}", error);

            let payload = serde_json::json!({
                "error": {
                    "kind": error_kind(&error),
                    "message": error.to_string(),
                }
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
            );

            std::process::exit(1);
        }
    }
}

/// Stable machine-readable category for an error.
fn error_kind(error: &AppError) -> &'static str {
    match error {
        AppError::Config(_) => "config",
        AppError::Source(_) => "source",
        AppError::Store(_) => "store",
        AppError::Compose(_) => "compose",
        AppError::Io(_) => "io",
        AppError::Serialization(_) => "serialization",
        AppError::Other(_) => "other",
    }
}
