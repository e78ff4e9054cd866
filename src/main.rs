//! Movies Graph API - Main Server
//!
//! Serves movie and cast details from a Neo4j movie graph.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use movies_graph_api::{AppState, Config, LogFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "movies-graph-api")]
#[command(about = "Movie and cast HTTP API over Neo4j")]
struct Cli {
    /// Path to a YAML config file (defaults to ./config.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides PORT / config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides SERVER_HOST / config file)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print a movie and its cast as JSON
    Movie {
        /// Exact movie title
        title: String,
    },

    /// Print movies whose title contains the query as JSON
    Search {
        /// Title substring, case-insensitive
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())
        .context("failed to load configuration")?;

    init_tracing(&config);
    tracing::debug!(
        config = %cli
            .config
            .as_deref()
            .unwrap_or(std::path::Path::new(movies_graph_api::DEFAULT_CONFIG_PATH))
            .display(),
        neo4j_uri = %config.neo4j_uri,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(host) = host {
                config.server_host = host;
            }
            movies_graph_api::start_server(config).await
        }
        Commands::Movie { title } => run_movie(config, &title).await,
        Commands::Search { query } => run_search(config, &query).await,
    }
}

fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run_movie(config: Config, title: &str) -> Result<()> {
    let state = AppState::new(config).await?;

    match state.movies.find_by_title(title).await? {
        Some(movie) => println!("{}", serde_json::to_string_pretty(&movie)?),
        None => tracing::info!("No movie titled {:?}", title),
    }

    Ok(())
}

async fn run_search(config: Config, query: &str) -> Result<()> {
    let state = AppState::new(config).await?;

    let movies = state.movies.search(query).await?;
    tracing::info!("{} movies match {:?}", movies.len(), query);
    println!("{}", serde_json::to_string_pretty(&movies)?);

    Ok(())
}
