//! Task Classifier - Main Entry Point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use task_classifier::api::{self, ClassificationService, SERVICE_NAME, SERVICE_VERSION};
use task_classifier::classifier::{Classifier, HeuristicClassifier};
use task_classifier::config::ServiceConfig;
use task_classifier::observability::{init_default_logging, metrics};
use tokio::signal;
use tracing::{error, info};

/// Heuristic coding-task classification service
#[derive(Parser)]
#[command(name = "task-classifier")]
#[command(about = "Classify coding tasks by type, complexity and execution strategy")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP classification service
    Serve {
        /// Port to listen on, overriding configuration and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Classify task descriptions and print the results as JSON
    Classify {
        /// Task descriptions to classify
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Validate configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging(cli.verbose);

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve { port } => run_server(config, port).await,
        Commands::Classify { texts } => classify_texts(&texts),
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ServiceConfig::load_from_file(path)?
        }
        None => {
            let default_paths = ["classifier.toml", "config/classifier.toml"];

            match default_paths
                .iter()
                .map(|path| PathBuf::from(*path))
                .find(|path| path.exists())
            {
                Some(path) => {
                    info!("Loading configuration from: {}", path.display());
                    ServiceConfig::load_from_file(&path)?
                }
                None => {
                    info!("No configuration file found, using defaults");
                    ServiceConfig::default()
                }
            }
        }
    };

    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

async fn run_server(
    mut config: ServiceConfig,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }

    info!("Starting {} service v{}", SERVICE_NAME, SERVICE_VERSION);

    // Start the uptime clock before the first request
    metrics();

    let classifier = HeuristicClassifier::new()?;
    info!("Heuristic classifier initialized");

    let service = Arc::new(ClassificationService::new(Arc::new(classifier), config));
    api::serve(service, shutdown_signal()).await?;

    info!("Shutting down {} service", SERVICE_NAME);
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            if signal::ctrl_c().await.is_ok() {
                info!("Received SIGINT, shutting down gracefully...");
            }
            return;
        }
    };

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

fn classify_texts(texts: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let classifier = HeuristicClassifier::new()?;
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    let results = classifier.classify_batch(&texts)?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn handle_config_command(
    config: &ServiceConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(config)?);
    }

    info!("Configuration validation complete");
    Ok(())
}
