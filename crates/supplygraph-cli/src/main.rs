//! SupplyGraph CLI - Command line interface for HasSourceAt links

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, has_source_at};
use config::{config_file_path, Config};
use output::OutputFormat;
use supplygraph_storage::MemoryStorage;

#[derive(Parser)]
#[command(name = "supplygraph")]
#[command(author, version, about = "Record and query which sources packages were built from")]
pub struct Cli {
    /// Config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a graph document and print the ingested links
    Ingest(has_source_at::IngestArgs),
    /// Load a graph document and query its links
    Query(has_source_at::QueryArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with storage backend
pub struct AppContext {
    pub storage: Arc<MemoryStorage>,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let format = cli
            .format
            .as_deref()
            .or(config.format.as_deref())
            .map(OutputFormat::from)
            .unwrap_or(OutputFormat::Text);

        Self {
            storage: Arc::new(MemoryStorage::new()),
            format,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config_path())?;

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error".to_string(),
        0 => config.log_level.clone().unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting supplygraph CLI");

    let ctx = AppContext::new(&cli, &config);

    match &cli.command {
        Commands::Ingest(args) => has_source_at::run_ingest(args, &ctx).await?,
        Commands::Query(args) => has_source_at::run_query(args, &ctx).await?,
        Commands::Config(args) => commands::config::run(args, &cli, &config)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
