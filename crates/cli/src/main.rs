//! Persona CLI, the main entry point.
//!
//! Commands:
//! - `serve` : Start the web chat gateway
//! - `ask`   : Interactive chat or single-message mode in the terminal
//! - `doctor`: Check configuration, credentials and loaded context

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "persona",
    about = "Persona: a chat assistant that answers questions about one person",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the TOML config file
    #[arg(
        short,
        long,
        global = true,
        env = "PERSONA_CONFIG",
        default_value = persona_config::DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web chat gateway
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with the assistant in the terminal
    Ask {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Diagnose configuration and context loading
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Values from .env win over the inherited environment.
    let dotenv = dotenvy::dotenv_override();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to read .env"),
    }

    match cli.command {
        Commands::Serve { port } => commands::serve::run(&cli.config, port).await?,
        Commands::Ask { message } => commands::ask::run(&cli.config, message).await?,
        Commands::Doctor => commands::doctor::run(&cli.config).await?,
    }

    Ok(())
}
