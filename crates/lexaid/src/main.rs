// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexaid - legal-aid intake client.
//!
//! This is the binary entry point: it loads configuration, installs the
//! tracing subscriber and dispatches to the selected subcommand.

mod render;
mod shell;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lexaid_config::LexaidConfig;

/// Lexaid - describe a legal problem, get guidance, generate documents.
#[derive(Parser, Debug)]
#[command(name = "lexaid", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive intake session (default).
    Shell,
    /// Check the legal service's health.
    Status {
        /// Output machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lexaid_config::load_and_validate_path(path),
        None => lexaid_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lexaid_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(config).await,
        Commands::Status { json, plain } => status::run_status(&config, json, plain).await,
        Commands::Config => print_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &LexaidConfig) -> Result<(), lexaid_core::LexaidError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| lexaid_core::LexaidError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Logs go to stderr so the shell's stdout stays readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lexaid={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
