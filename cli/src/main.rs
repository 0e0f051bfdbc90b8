//! # LaundryBot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the LaundryBot CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and the catalog once, before any command runs
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! laundrybot --help
//!
//! # Ask a single question with debug logging
//! laundrybot -vv ask harga cuci sepatu
//!
//! # Use a different catalog
//! laundrybot --catalog ./my-catalog.toml chat
//! ```
//!
use clap::Parser;
use laundrybot::commands::{self, AppContext};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "laundrybot",
    about = "🧺 LaundryBot: chat assistant for a laundry ordering service",
    long_about = "Answers customer questions about services, prices and processing times\n\
                  from a fixed catalog, in the terminal or over HTTP.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Catalog TOML file to use instead of the configured or built-in one.
    #[arg(long, global = true, env = "LAUNDRYBOT_CATALOG")]
    catalog: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    Catalog(commands::catalog::CatalogArgs),
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match AppContext::load(cli.catalog) {
        Ok(ctx) => match cli.command {
            Commands::Ask(args) => commands::ask::handle_ask(args, &ctx),
            Commands::Catalog(args) => commands::catalog::handle_catalog(args, &ctx),
            Commands::Chat(args) => commands::chat::handle_chat(args, &ctx),
            Commands::Serve(args) => commands::serve::handle_serve(args, &ctx).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn laundrybot_cmd() -> Command {
        Command::cargo_bin("laundrybot").expect("Failed to find laundrybot binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        laundrybot_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        laundrybot_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
