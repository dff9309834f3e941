//! Mirage server CLI
//!
//! Serves the simulation API over HTTP and offers a few configuration helpers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mirage::{Config, EXAMPLE_CONFIG, Simulator};
use tokio::net::TcpListener;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

mod routes;

#[derive(Parser)]
#[command(name = "mirage")]
#[command(about = "Simulated code execution backed by a text-completion model")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on (overrides the configuration)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Output path (default: mirage.toml)
        #[arg(short, long, default_value = "mirage.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// List available languages
    Languages,

    /// Show the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { output, force } => init_config(&output, force).await,
        Commands::Serve { bind } => {
            let config = load_config(cli.config.as_deref())?;
            serve(&config, bind).await
        }
        Commands::Languages => {
            list_languages(&load_config(cli.config.as_deref())?);
            Ok(())
        }
        Commands::ShowConfig => {
            show_config(&load_config(cli.config.as_deref())?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        info!(?path, "loading configuration");
    } else {
        debug!("using default configuration");
    }
    Config::load(path).context("failed to load configuration")
}

async fn serve(config: &Config, bind: Option<String>) -> Result<()> {
    let simulator = Simulator::from_config(config).context("failed to set up completion gateway")?;
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        model = %config.completion.model,
        languages = config.languages.len(),
        "listening"
    );

    axum::serve(listener, routes::router(simulator))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

fn list_languages(config: &Config) {
    println!("Available languages:\n");

    for lang in config.languages.sorted() {
        let mode = if lang.supports_simulated_execution() {
            "simulated"
        } else {
            "live preview"
        };
        println!("  {:<15} {} ({}, {})", lang.key, lang.name, lang.kind, mode);
    }
}

fn show_config(config: &Config) {
    println!("Completion endpoint:");
    println!("  Base URL: {}", config.completion.base_url);
    println!("  Model: {}", config.completion.model);
    println!(
        "  API key: {}",
        if config.completion.api_key.is_some() {
            "set in configuration".to_owned()
        } else {
            format!("read from ${}", config.completion.api_key_env)
        }
    );
    println!("  Timeout: {}s", config.completion.timeout_secs);
    println!();
    println!("Server bind address: {}", config.server.bind);
    println!();
    println!("Languages configured: {}", config.languages.len());
}

async fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at '{}'. Use --force to overwrite.",
            output.display()
        );
    }

    tokio::fs::write(output, EXAMPLE_CONFIG)
        .await
        .context("failed to write configuration file")?;

    println!("Created configuration file at '{}'", output.display());
    Ok(())
}
