//! Hearth CLI - minimal personal-site server.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Minimal personal-site server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the articles and start the site server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Articles directory (overrides config)
        #[arg(short, long)]
        articles_dir: Option<PathBuf>,

        /// Static files directory (overrides config)
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },

    /// Load the articles once and report what would be served
    Check {
        /// Articles directory (overrides config)
        #[arg(short, long)]
        articles_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Serve {
            port,
            host,
            articles_dir,
            static_dir,
        } => {
            commands::serve::run(&cli.config, port, host, articles_dir, static_dir).await?;
        }
        Commands::Check { articles_dir } => {
            commands::check::run(&cli.config, articles_dir)?;
        }
    }

    Ok(())
}
